use httpgen_descriptor::{ApiManifest, BuildOptions, SnippetGroup, StaticProvider};
use httpgen_regen::{
    DirectoryStore, MemoryStore, Outcome, RegenError, Regenerator, Result, ScaffoldTemplates,
    SnippetStore, ENV_FILE, PRIVATE_ENV_FILE, USER_ENV_FILE,
};
use httpgen_snippet::{HttpMethod, Snippet};
use pretty_assertions::assert_eq;
use std::fs;

const MANIFEST: &str = r#"{
  "controllers": [
    {
      "name": "OrderController",
      "route": "api/[controller]",
      "actions": [
        {
          "method": "GET",
          "route": "all",
          "parameters": [
            { "name": "page", "type": { "kind": "integer" } },
            { "name": "customer", "type": { "kind": "guid" } }
          ]
        },
        {
          "method": "POST",
          "parameters": [
            { "name": "order", "binding": "body", "type": { "kind": "object", "name": "Order" } }
          ]
        }
      ]
    },
    { "name": "AuditController", "actions": [] }
  ],
  "types": {
    "Order": {
      "members": [
        { "name": "Id", "type": { "kind": "integer" } },
        { "name": "Note", "type": { "kind": "string" } }
      ]
    }
  }
}"#;

const HEADERS: &str = "Accept: application/json\nContent-Type: application/json\nAuthorization: bearer {{value}}\n";

fn provider() -> StaticProvider {
    StaticProvider::new(ApiManifest::from_json_str(MANIFEST).unwrap())
}

#[test]
fn first_run_creates_files_and_scaffold() {
    let temp = tempfile::tempdir().unwrap();
    let out = temp.path().join("HttpApi");
    let store = DirectoryStore::open(&out).unwrap();
    let mut regen = Regenerator::new(store).with_scaffold(ScaffoldTemplates::bundled());

    let report = regen
        .regenerate(&provider(), &BuildOptions::default())
        .unwrap();

    let outcomes: Vec<_> = report
        .entries
        .iter()
        .map(|e| (e.file.as_str(), e.outcome.clone()))
        .collect();
    assert_eq!(
        outcomes,
        vec![
            (PRIVATE_ENV_FILE, Outcome::Created),
            (USER_ENV_FILE, Outcome::Created),
            (ENV_FILE, Outcome::Created),
            ("Order.http", Outcome::Created),
            ("Audit.http", Outcome::Skipped),
        ]
    );
    assert!(!out.join("Audit.http").exists());

    let expected = format!(
        "###\nGET {{{{Api_HostAddress}}}}/api/order/all?page=1&customer=00000000-0000-0000-0000-000000000000\n{HEADERS}\n\n\
         ###\nPOST {{{{Api_HostAddress}}}}/api/order\n{HEADERS}\n{{\n  \"id\": 0,\n  \"note\": \"stringValue\"\n}}\n\n"
    );
    assert_eq!(fs::read_to_string(out.join("Order.http")).unwrap(), expected);
}

#[test]
fn user_edits_survive_regeneration() {
    let temp = tempfile::tempdir().unwrap();
    let out = temp.path().join("HttpApi");
    fs::create_dir_all(&out).unwrap();
    fs::write(
        out.join("Order.http"),
        "### list\n\
         GET {{Api_HostAddress}}/api/order/all?page=4&customer=9b2e&stale=1\n\
         Authorization: bearer abc\n\
         \n\
         ###\n\
         POST {{Api_HostAddress}}/api/order\n\
         \n\
         {\"note\": \"hello\", \"legacy\": true}\n\
         \n\
         ###\n\
         DELETE {{Api_HostAddress}}/api/order/removed\n\
         \n",
    )
    .unwrap();

    let mut regen = Regenerator::new(DirectoryStore::open(&out).unwrap());
    let report = regen
        .regenerate(&provider(), &BuildOptions::default())
        .unwrap();
    assert_eq!(report.outcome("Order.http"), Some(&Outcome::Updated));

    let expected = format!(
        "###\nGET {{{{Api_HostAddress}}}}/api/order/all?page=4&customer=9b2e\n{HEADERS}\n\n\
         ###\nPOST {{{{Api_HostAddress}}}}/api/order\n{HEADERS}\n{{\n  \"id\": 0,\n  \"note\": \"hello\"\n}}\n\n"
    );
    assert_eq!(fs::read_to_string(out.join("Order.http")).unwrap(), expected);
}

#[test]
fn second_run_is_stable() {
    let temp = tempfile::tempdir().unwrap();
    let out = temp.path().join("HttpApi");
    let options = BuildOptions::default();

    let mut regen = Regenerator::new(DirectoryStore::open(&out).unwrap());
    regen.regenerate(&provider(), &options).unwrap();
    let first = fs::read_to_string(out.join("Order.http")).unwrap();

    let report = regen.regenerate(&provider(), &options).unwrap();
    assert_eq!(report.outcome("Order.http"), Some(&Outcome::Updated));
    assert_eq!(fs::read_to_string(out.join("Order.http")).unwrap(), first);

    let mut preview = Regenerator::new(DirectoryStore::open(&out).unwrap()).dry_run(true);
    let report = preview.regenerate(&provider(), &options).unwrap();
    assert_eq!(report.outcome("Order.http"), Some(&Outcome::Unchanged));
}

#[test]
fn scaffold_files_are_never_overwritten() {
    let temp = tempfile::tempdir().unwrap();
    let out = temp.path().join("HttpApi");
    fs::create_dir_all(&out).unwrap();
    fs::write(out.join(ENV_FILE), "{\"dev\": {\"mine\": true}}").unwrap();

    let mut regen = Regenerator::new(DirectoryStore::open(&out).unwrap())
        .with_scaffold(ScaffoldTemplates::bundled().with_host_variable("Shop_Host"));
    let report = regen.run(&[]);

    assert_eq!(report.outcome(ENV_FILE), Some(&Outcome::Skipped));
    assert_eq!(report.outcome(PRIVATE_ENV_FILE), Some(&Outcome::Created));
    assert_eq!(
        fs::read_to_string(out.join(ENV_FILE)).unwrap(),
        "{\"dev\": {\"mine\": true}}"
    );
    assert!(fs::read_to_string(out.join(USER_ENV_FILE))
        .unwrap()
        .contains("Shop_Host"));
}

#[test]
fn dry_run_writes_nothing() {
    let temp = tempfile::tempdir().unwrap();
    let out = temp.path().join("HttpApi");
    let mut regen = Regenerator::new(DirectoryStore::open(&out).unwrap())
        .with_scaffold(ScaffoldTemplates::bundled())
        .dry_run(true);

    let report = regen
        .regenerate(&provider(), &BuildOptions::default())
        .unwrap();

    assert!(report.dry_run);
    assert_eq!(report.outcome("Order.http"), Some(&Outcome::Created));
    assert_eq!(report.outcome(ENV_FILE), Some(&Outcome::Created));
    assert_eq!(fs::read_dir(&out).unwrap().count(), 0);
}

#[test]
fn invalid_utf8_file_is_regenerated_from_scratch() {
    let mut store = MemoryStore::new();
    store.insert("Order.http", vec![0xff, 0xfe, b'\n']);
    let group = SnippetGroup {
        name: "Order".into(),
        snippets: vec![Snippet::new(HttpMethod::Get, "/order?page=1")],
    };

    let mut regen = Regenerator::new(store);
    let report = regen.run(&[group]);

    assert_eq!(report.outcome("Order.http"), Some(&Outcome::Updated));
    assert_eq!(
        regen.store().text("Order.http"),
        Some("###\nGET /order?page=1\n\n\n")
    );
}

/// Memory store that refuses to write one file
struct ReadOnlyFile {
    inner: MemoryStore,
    locked: &'static str,
}

impl SnippetStore for ReadOnlyFile {
    fn load(&self, file_name: &str) -> Result<Option<Vec<u8>>> {
        self.inner.load(file_name)
    }

    fn write(&mut self, file_name: &str, text: &str) -> Result<()> {
        if file_name == self.locked {
            return Err(RegenError::Write {
                path: file_name.into(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            });
        }
        self.inner.write(file_name, text)
    }
}

#[test]
fn one_failing_file_does_not_stop_the_run() {
    let groups = vec![
        SnippetGroup {
            name: "Customer".into(),
            snippets: vec![Snippet::new(HttpMethod::Get, "/customer")],
        },
        SnippetGroup {
            name: "Order".into(),
            snippets: vec![Snippet::new(HttpMethod::Get, "/order")],
        },
    ];
    let store = ReadOnlyFile {
        inner: MemoryStore::new(),
        locked: "Customer.http",
    };

    let mut regen = Regenerator::new(store);
    let report = regen.run(&groups);

    assert!(report.has_failures());
    assert!(matches!(
        report.outcome("Customer.http"),
        Some(Outcome::Failed { reason }) if reason.contains("read-only")
    ));
    assert_eq!(report.outcome("Order.http"), Some(&Outcome::Created));
    assert_eq!(
        regen.into_store().inner.text("Order.http"),
        Some("###\nGET /order\n\n\n")
    );
}
