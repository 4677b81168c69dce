use localcloud::Error;
use localcloud::EntryKind;
use localcloud::ListOptions;
use localcloud::ReturnScope;
use localcloud::TestRoot;
use localcloud::wire::listing_envelope;

fn names(entries: &[localcloud::Entry]) -> Vec<&str> {
    let mut names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
    names.sort();
    names
}

fn txt_options(recursive: bool, scope: ReturnScope) -> ListOptions {
    let mut options = ListOptions::new(recursive, scope);
    options.allow_extension("txt");
    options
}

#[tokio::test]
async fn filter_keeps_matching_files_and_all_directories() {
    let fixture = TestRoot::new().unwrap();
    let entries = fixture
        .cloud()
        .list(&fixture.fragment(""), &txt_options(false, ReturnScope::All))
        .await
        .unwrap();
    // b.jpg and noext fail the filter; directories pass regardless.
    assert_eq!(names(&entries), vec!["a.txt", "empty", "sub"]);
}

#[tokio::test]
async fn flat_listing_leaves_children_empty() {
    let fixture = TestRoot::new().unwrap();
    let entries = fixture
        .cloud()
        .list(&fixture.fragment(""), &txt_options(false, ReturnScope::All))
        .await
        .unwrap();
    let sub = entries.iter().find(|e| e.name == "sub").unwrap();
    assert_eq!(sub.kind, EntryKind::Directory);
    assert!(sub.children.is_empty());
}

#[tokio::test]
async fn recursive_listing_populates_children() {
    let fixture = TestRoot::new().unwrap();
    let entries = fixture
        .cloud()
        .list(&fixture.fragment(""), &txt_options(true, ReturnScope::All))
        .await
        .unwrap();
    let sub = entries.iter().find(|e| e.name == "sub").unwrap();
    assert_eq!(names(&sub.children), vec!["c.txt", "nested"]);
    let nested = sub.children.iter().find(|e| e.name == "nested").unwrap();
    assert_eq!(names(&nested.children), vec!["d.txt"]);
    let empty = entries.iter().find(|e| e.name == "empty").unwrap();
    assert!(empty.children.is_empty());
}

#[tokio::test]
async fn files_never_have_children() {
    let fixture = TestRoot::new().unwrap();
    let entries = fixture
        .cloud()
        .list(&fixture.fragment(""), &txt_options(true, ReturnScope::All))
        .await
        .unwrap();
    for entry in &entries {
        if entry.kind == EntryKind::File {
            assert!(entry.children.is_empty());
        }
    }
}

#[tokio::test]
async fn empty_filter_returns_no_files() {
    let fixture = TestRoot::new().unwrap();
    let entries = fixture
        .cloud()
        .list(
            &fixture.fragment(""),
            &ListOptions::new(false, ReturnScope::Files),
        )
        .await
        .unwrap();
    assert!(entries.is_empty());
}

#[tokio::test]
async fn directories_scope_ignores_the_file_filter() {
    let fixture = TestRoot::new().unwrap();
    let entries = fixture
        .cloud()
        .list(
            &fixture.fragment(""),
            &ListOptions::new(false, ReturnScope::Directories),
        )
        .await
        .unwrap();
    assert_eq!(names(&entries), vec!["empty", "sub"]);
}

#[tokio::test]
async fn uris_are_forward_slash_paths_rooted_at_the_served_root() {
    let fixture = TestRoot::new().unwrap();
    let entries = fixture
        .cloud()
        .list(&fixture.fragment(""), &txt_options(true, ReturnScope::All))
        .await
        .unwrap();
    let a = entries.iter().find(|e| e.name == "a.txt").unwrap();
    assert_eq!(a.uri, format!("{}/a.txt", fixture.path().display()));
    let sub = entries.iter().find(|e| e.name == "sub").unwrap();
    let c = sub.children.iter().find(|e| e.name == "c.txt").unwrap();
    assert_eq!(c.uri, format!("{}/sub/c.txt", fixture.path().display()));
    assert!(!c.uri.contains('\\'));
}

#[tokio::test]
async fn listing_a_missing_path_is_not_found() {
    let fixture = TestRoot::new().unwrap();
    let err = fixture
        .cloud()
        .list(
            &fixture.fragment("gone"),
            &txt_options(false, ReturnScope::All),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound { .. }));
}

#[tokio::test]
async fn listing_a_file_is_an_invalid_target() {
    let fixture = TestRoot::new().unwrap();
    let err = fixture
        .cloud()
        .list(
            &fixture.fragment("a.txt"),
            &txt_options(false, ReturnScope::All),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidTarget { .. }));
}

#[tokio::test]
async fn escaping_fragment_is_refused_before_any_io() {
    let fixture = TestRoot::new().unwrap();
    let fragment = format!("{}/../../etc", fixture.fragment(""));
    let err = fixture
        .cloud()
        .list(&fragment, &txt_options(false, ReturnScope::All))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::OutOfBounds { .. }));
}

#[cfg(unix)]
#[tokio::test]
async fn failure_mid_descent_aborts_the_whole_listing() {
    use std::os::unix::fs::PermissionsExt;

    let fixture = TestRoot::new().unwrap();
    let locked = fixture.path().join("sub/nested");
    std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o000)).unwrap();
    // Privileged users can read the directory anyway; only assert when the
    // permission change actually locks us out.
    let effectively_locked = std::fs::read_dir(&locked).is_err();

    let result = fixture
        .cloud()
        .list(&fixture.fragment(""), &txt_options(true, ReturnScope::All))
        .await;

    std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o755)).unwrap();
    if effectively_locked {
        assert!(matches!(result, Err(Error::Io { .. })));
    }
}

#[tokio::test]
async fn listing_serializes_into_the_root_envelope() {
    let fixture = TestRoot::new().unwrap();
    let cloud = fixture.cloud();
    let resolved = cloud.resolve(&fixture.fragment("")).unwrap();
    assert!(resolved.is_root());

    let entries = cloud
        .list(&fixture.fragment(""), &txt_options(false, ReturnScope::All))
        .await
        .unwrap();
    let root_uri = localcloud::utils::slash_uri(resolved.path());
    let json = serde_json::to_value(listing_envelope(&root_uri, &entries)).unwrap();
    assert_eq!(json["name"], "root");
    assert_eq!(json["uri"], format!("{root_uri}/"));
    let children = json["children"].as_array().unwrap();
    assert_eq!(children.len(), 3);
    for child in children {
        assert!(child["size"].is_string());
        assert!(child["modifieddate"].is_string());
    }
}
