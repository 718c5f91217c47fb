use docret_core::loader::{load_documents, LoaderOptions};
use std::fs;
use tempfile::tempdir;

#[test]
fn loads_txt_files_in_name_order() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("b.txt"), "second").unwrap();
    fs::write(dir.path().join("a.txt"), "first").unwrap();
    fs::write(dir.path().join("c.md"), "ignored").unwrap();
    fs::create_dir(dir.path().join("nested")).unwrap();
    fs::write(dir.path().join("nested/d.txt"), "deep").unwrap();

    let docs = load_documents(dir.path(), &LoaderOptions::default()).unwrap();
    let names: Vec<&str> = docs.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["a.txt", "b.txt"]);
    assert_eq!(docs[0].text, "first");
}

#[test]
fn recursive_and_any_extension() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "x").unwrap();
    fs::write(dir.path().join("notes.md"), "y").unwrap();
    fs::create_dir(dir.path().join("sub")).unwrap();
    fs::write(dir.path().join("sub").join("z.txt"), "z").unwrap();

    let opts = LoaderOptions { extension: String::new(), recursive: true };
    let docs = load_documents(dir.path(), &opts).unwrap();
    assert_eq!(docs.len(), 3);
    assert!(docs.iter().any(|d| d.text == "z"));
}

#[test]
fn non_utf8_files_are_skipped() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("bad.txt"), [0xff, 0xfe, 0x00, 0x80]).unwrap();
    fs::write(dir.path().join("good.txt"), "ok").unwrap();
    let docs = load_documents(dir.path(), &LoaderOptions::default()).unwrap();
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].name, "good.txt");
}

#[test]
fn missing_directory_is_an_error() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("nope");
    assert!(load_documents(&missing, &LoaderOptions::default()).is_err());
}
