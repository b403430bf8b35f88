// ABOUTME: Integration tests verifying the three layers work together.
// ABOUTME: Builds a small document-sharing policy from permits and privileges.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde::Deserialize;
use serde_json::json;
use warden::prelude::*;

/// A role required to act on a document.
#[derive(Debug, Deserialize)]
struct Grant {
    scope: String,
    #[serde(default)]
    error: Option<String>,
}

impl Role for Grant {
    type Error = String;

    fn error(&self) -> Option<String> {
        self.error.clone()
    }
}

fn grant(scope: &str) -> Arc<Grant> {
    Arc::new(Grant {
        scope: scope.to_string(),
        error: Some(format!("requires {scope}")),
    })
}

#[derive(Debug, Clone)]
struct Doc {
    id: u32,
    public: bool,
}

/// A session privilege: accepts exactly the scopes the caller holds.
fn session(scopes: &[&str]) -> Privilege<Grant> {
    let scopes: Vec<String> = scopes.iter().map(|s| s.to_string()).collect();
    Rule::from_fn(move |role: Arc<Grant>| {
        if scopes.contains(&role.scope) {
            Approval::grant().into()
        } else {
            Rule::sequence(vec![])
        }
    })
}

/// Roles a document demands, looked up asynchronously.
fn doc_roles(store: Arc<HashMap<u32, Vec<&'static str>>>) -> Permit<Doc, Grant> {
    Rule::from_async_fn(move |doc: Doc| {
        let store = Arc::clone(&store);
        async move {
            tokio::task::yield_now().await;
            let scopes = store.get(&doc.id).cloned().unwrap_or_default();
            Ok(Rule::sequence(
                scopes.into_iter().map(|scope| Rule::terminal(grant(scope))),
            ))
        }
    })
}

fn public_read() -> Permission<Doc, Grant> {
    Rule::from_fn(|ctx: PermissionContext<Grant, Doc>| {
        if ctx.target.public {
            Approval::grant().into()
        } else {
            Approval::deny_with("private".to_string()).into()
        }
    })
}

fn store() -> Arc<HashMap<u32, Vec<&'static str>>> {
    Arc::new(HashMap::from([
        (1, vec!["docs:read"]),
        (2, vec!["docs:read", "docs:write"]),
        (3, vec![]),
    ]))
}

#[tokio::test]
async fn test_read_policy_combines_public_and_roles() {
    let read = Permission::some(vec![public_read(), Permission::create(doc_roles(store()))]);
    let reader = session(&["docs:read"]);
    let nobody = session(&[]);

    let private_doc = Doc {
        id: 1,
        public: false,
    };
    let public_doc = Doc {
        id: 2,
        public: true,
    };

    assert!(is_permissioned(&read, &reader, private_doc.clone()).await.unwrap());
    assert!(!is_permissioned(&read, &nobody, private_doc).await.unwrap());
    assert!(is_permissioned(&read, &nobody, public_doc).await.unwrap());
}

#[tokio::test]
async fn test_write_requires_every_role() {
    let write = Permission::every(vec![Permission::create(doc_roles(store()))]);
    let doc = Doc {
        id: 2,
        public: false,
    };

    let err = require_permission(&write, &session(&["docs:read"]), doc.clone())
        .await
        .unwrap_err();
    assert_eq!(err.cause().map(String::as_str), Some("requires docs:write"));

    let target = require_permission(&write, &session(&["docs:read", "docs:write"]), doc)
        .await
        .unwrap();
    assert_eq!(target.id, 2);
}

#[tokio::test]
async fn test_document_without_roles_is_denied() {
    let permission = Permission::create(doc_roles(store()));
    let doc = Doc {
        id: 3,
        public: true,
    };

    let approval = check_permission(&permission, &session(&["docs:read"]), doc)
        .await
        .unwrap();
    assert_eq!(approval, Approval::deny());
}

#[tokio::test]
async fn test_permit_scenario_first_role_decides() {
    let permit: Permit<(), Grant> = Rule::from_fn(|_| {
        Rule::sequence(vec![
            Rule::terminal(grant("owner")),
            Rule::terminal(grant("admin")),
        ])
    });

    let approval = check_permit(&permit, &session(&["admin"]), ()).await.unwrap();
    assert!(approval.is_denied());
    assert_eq!(approval.error.as_deref(), Some("requires owner"));
}

#[tokio::test]
async fn test_cached_session_privilege_across_checks() {
    let lookups = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&lookups);
    let inner = session(&["docs:read"]);
    let privilege = Privilege::cached(Rule::from_fn(move |_: Arc<Grant>| {
        counter.fetch_add(1, Ordering::SeqCst);
        inner.clone()
    }));

    let role = grant("docs:read");
    for _ in 0..3 {
        assert!(is_privileged(&privilege, role.clone()).await.unwrap());
    }
    assert_eq!(lookups.load(Ordering::SeqCst), 1);

    // Each permit resolution mints fresh roles, so every check is a miss.
    let permission = Permission::create(doc_roles(store()));
    let doc = Doc {
        id: 1,
        public: false,
    };
    for _ in 0..2 {
        assert!(is_permissioned(&permission, &privilege, doc.clone()).await.unwrap());
    }
    assert_eq!(lookups.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_externally_loaded_rules() {
    let privilege: Privilege<serde_json::Value> = Rule::json(json!([
        {"value": true},
        [{"value": true}]
    ]));
    let role = Arc::new(json!({"scope": "any"}));
    assert!(is_privileged(&privilege, role.clone()).await.unwrap());

    let broken: Privilege<serde_json::Value> = Rule::json(json!([{"value": true}, 1]));
    let err = require_privilege(&broken, role).await.unwrap_err();
    match err {
        AccessError::Rule(RuleError::InvalidRuleType { layer, found }) => {
            assert_eq!(layer, Layer::Privilege);
            assert_eq!(found, "number");
        }
        other => panic!("expected a structural fault, got {other:?}"),
    }
}
