//! Full-stack flows over a real file-backed store, the way a UI session
//! would drive them: fill the form, watch the feedback, submit, page the
//! list, edit, delete, reopen.

use chrono::Utc;
use formbook::api::FormbookApi;
use formbook::form::{AddressField, SubmitOutcome, SUCCESS_MESSAGE};
use formbook::picture::PLACEHOLDER_PNG;
use formbook::store::fs::FileStore;
use formbook::store::ENTRIES_KEY;
use formbook::validate::Field;
use tempfile::TempDir;

fn open(dir: &TempDir) -> FormbookApi<FileStore> {
    FormbookApi::new(FileStore::new(dir.path())).unwrap()
}

fn submit_minimal(api: &mut FormbookApi<FileStore>, name: &str) {
    api.set_field(Field::Name, name);
    api.set_field(Field::Email, &format!("{}@example.com", name.to_lowercase()));
    api.set_field(Field::PhoneNumber, "9812345678");
    let outcome = api.submit().unwrap();
    assert!(matches!(outcome, SubmitOutcome::Saved(_)));
}

#[test]
fn a_new_contact_goes_in_and_comes_back() {
    let dir = TempDir::new().unwrap();
    let mut api = open(&dir);

    api.set_field(Field::Name, "Ram Shrestha");
    api.set_field(Field::Email, "ram@example.com");

    // Too-short phone is flagged while typing, before any submit.
    api.set_field(Field::PhoneNumber, "12345");
    assert_eq!(
        api.form().error(Field::PhoneNumber).unwrap().to_string(),
        "Phone number must be at least 7 digits."
    );
    api.set_field(Field::PhoneNumber, "9812345678");
    assert_eq!(api.form().error(Field::PhoneNumber), None);

    api.set_field(Field::Dob, "1990-04-12");
    api.set_address_field(AddressField::City, "Kathmandu");
    api.set_address_field(AddressField::District, "Kathmandu");
    api.set_address_field(AddressField::Province, "3");

    let outcome = api.submit().unwrap();
    assert!(matches!(outcome, SubmitOutcome::Saved(_)));
    assert_eq!(api.success_notice(Utc::now()), Some(SUCCESS_MESSAGE));

    // He shows up on page one with no picture.
    let page = api.list().page_entries();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].name, "Ram Shrestha");
    assert_eq!(page[0].profile_picture, None);

    // And is still there for the next session.
    let api = open(&dir);
    let entry = &api.list().entries()[0];
    assert_eq!(entry.name, "Ram Shrestha");
    assert_eq!(entry.dob, "1990-04-12");
    assert_eq!(entry.address.city, "Kathmandu");
    assert_eq!(entry.address.country, "Nepal");
}

#[test]
fn editing_across_sessions_keeps_the_position() {
    let dir = TempDir::new().unwrap();
    let mut api = open(&dir);
    for name in ["First", "Second", "Third"] {
        submit_minimal(&mut api, name);
    }

    let mut api = open(&dir);
    api.edit(1).unwrap();
    api.set_field(Field::Email, "second.new@example.com");
    api.submit().unwrap();

    let api = open(&dir);
    let entries = api.list().entries();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[1].name, "Second");
    assert_eq!(entries[1].email, "second.new@example.com");
}

#[test]
fn deleting_shifts_everything_after_it() {
    let dir = TempDir::new().unwrap();
    let mut api = open(&dir);
    for i in 1..=6 {
        submit_minimal(&mut api, &format!("Entry{i}"));
    }
    assert!(api.list().controls_visible());

    let removed = api.delete(0).unwrap();
    assert_eq!(removed.name, "Entry1");

    let api = open(&dir);
    assert_eq!(api.list().len(), 5);
    assert_eq!(api.list().entries()[0].name, "Entry2");
    assert!(!api.list().controls_visible());
}

#[test]
fn a_picture_survives_as_a_name_only() {
    let dir = TempDir::new().unwrap();
    let avatar = dir.path().join("avatar.png");
    std::fs::write(&avatar, PLACEHOLDER_PNG).unwrap();

    let mut api = open(&dir);
    api.set_field(Field::Name, "Ram Shrestha");
    api.set_field(Field::Email, "ram@example.com");
    api.set_field(Field::PhoneNumber, "9812345678");
    api.attach_picture(&avatar).unwrap();
    assert!(!api.form().preview().is_placeholder());
    api.submit().unwrap();

    let api = open(&dir);
    assert_eq!(
        api.list().entries()[0].profile_picture.as_deref(),
        Some("avatar.png")
    );

    // Only the name is persisted, never the bytes.
    let raw = std::fs::read_to_string(dir.path().join(format!("{ENTRIES_KEY}.json"))).unwrap();
    assert!(!raw.contains("base64"));
}

#[test]
fn a_record_from_before_ids_existed_can_be_edited_in_place() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join(format!("{ENTRIES_KEY}.json")),
        r#"[{"name":"Ram","email":"ram@example.com","phoneNumber":"9812345678"}]"#,
    )
    .unwrap();

    let mut api = open(&dir);
    let minted = api.list().entries()[0].id;
    api.edit(0).unwrap();
    let outcome = api.submit().unwrap();
    assert!(matches!(outcome, SubmitOutcome::Saved(_)));

    let api = open(&dir);
    assert_eq!(api.list().len(), 1);
    assert_eq!(api.list().entries()[0].name, "Ram");
    assert_eq!(api.list().entries()[0].id, minted);
}

#[test]
fn a_torn_down_data_file_still_opens() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(format!("{ENTRIES_KEY}.json")), "oops").unwrap();

    let mut api = open(&dir);
    assert!(api.list().is_empty());

    // The store heals on the next save.
    submit_minimal(&mut api, "Fresh");
    let api = open(&dir);
    assert_eq!(api.list().len(), 1);
}
