//! Property tests for registry invariants
//!
//! Random operation sequences from a small cast of principals are applied to
//! a registry; after every step the registry is checked against a simple
//! reference model.

use cairn_registry::{
    CallContext, ContentId, ContentMetadata, ErrorKind, PrincipalId, Registry, RegistryConfig,
};
use proptest::prelude::*;
use std::collections::{BTreeMap, BTreeSet};

const CAST: &[&str] = &["alice", "bob", "carol"];

#[derive(Debug, Clone)]
enum Op {
    Create { caller: usize, valid: bool },
    Transfer { caller: usize, target: u64, to: usize },
    Update { caller: usize, target: u64, valid: bool },
    Delete { caller: usize, target: u64 },
}

fn arb_op() -> impl Strategy<Value = Op> {
    let who = 0..CAST.len();
    prop_oneof![
        (who.clone(), any::<bool>()).prop_map(|(caller, valid)| Op::Create { caller, valid }),
        (who.clone(), 0u64..8, 0..CAST.len())
            .prop_map(|(caller, target, to)| Op::Transfer { caller, target, to }),
        (who.clone(), 0u64..8, any::<bool>())
            .prop_map(|(caller, target, valid)| Op::Update { caller, target, valid }),
        (who, 0u64..8).prop_map(|(caller, target)| Op::Delete { caller, target }),
    ]
}

fn metadata(valid: bool) -> ContentMetadata {
    if valid {
        ContentMetadata::new("doc", 10, "summary", ["tag"])
    } else {
        ContentMetadata::new("doc", 0, "summary", ["tag"])
    }
}

/// Reference model: owners of live records plus grant rows
#[derive(Default)]
struct Model {
    counter: u64,
    owners: BTreeMap<u64, usize>,
    grants: BTreeSet<(u64, usize)>,
}

impl Model {
    fn owner_check(&self, caller: usize, target: u64) -> Result<(), ErrorKind> {
        match self.owners.get(&target) {
            None => Err(ErrorKind::ContentNotFound),
            Some(owner) if *owner != caller => Err(ErrorKind::OwnershipMismatch),
            Some(_) => Ok(()),
        }
    }

    fn apply(&mut self, op: &Op) -> Result<(), ErrorKind> {
        match *op {
            Op::Create { caller, valid } => {
                if !valid {
                    return Err(ErrorKind::SizeLimitExceeded);
                }
                self.counter += 1;
                self.owners.insert(self.counter, caller);
                self.grants.insert((self.counter, caller));
                Ok(())
            }
            Op::Transfer { caller, target, to } => {
                self.owner_check(caller, target)?;
                self.owners.insert(target, to);
                Ok(())
            }
            Op::Update { caller, target, valid } => {
                self.owner_check(caller, target)?;
                if valid {
                    Ok(())
                } else {
                    Err(ErrorKind::SizeLimitExceeded)
                }
            }
            Op::Delete { caller, target } => {
                self.owner_check(caller, target)?;
                self.owners.remove(&target);
                Ok(())
            }
        }
    }
}

fn apply(registry: &Registry, op: &Op) -> Result<(), ErrorKind> {
    let ctx = |who: usize| CallContext::new(CAST[who], 1);
    let result = match *op {
        Op::Create { caller, valid } => registry
            .create_record(&ctx(caller), metadata(valid))
            .map(|_| ()),
        Op::Transfer { caller, target, to } => registry.transfer_ownership(
            &ctx(caller),
            ContentId::new(target),
            PrincipalId::new(CAST[to]),
        ),
        Op::Update { caller, target, valid } => {
            registry.update_metadata(&ctx(caller), ContentId::new(target), metadata(valid))
        }
        Op::Delete { caller, target } => {
            registry.delete_record(&ctx(caller), ContentId::new(target))
        }
    };
    result.map_err(|err| err.kind())
}

proptest! {
    /// Registry outcomes, ownership and access decisions agree with the model
    #[test]
    fn registry_matches_reference_model(ops in prop::collection::vec(arb_op(), 1..40)) {
        let registry = Registry::new(&RegistryConfig::with_root_authority("root"));
        let mut model = Model::default();

        for op in &ops {
            let before = registry.snapshot();
            let expected = model.apply(op);
            let actual = apply(&registry, op);
            prop_assert_eq!(actual, expected, "op {:?}", op);

            // Rejections leave every resource untouched
            if actual.is_err() {
                prop_assert_eq!(registry.snapshot(), before);
            }
            prop_assert_eq!(registry.fetch_metrics().total_entries, model.counter);
        }

        for target in 1..=model.counter {
            let id = ContentId::new(target);
            for (who, name) in CAST.iter().enumerate() {
                let principal = PrincipalId::new(*name);
                match model.owners.get(&target) {
                    None => {
                        prop_assert!(registry.analyze_access(id, &principal).is_err());
                    }
                    Some(owner) => {
                        let analysis = registry.analyze_access(id, &principal).unwrap();
                        let is_owner = *owner == who;
                        let has_grant = model.grants.contains(&(target, who));
                        prop_assert_eq!(analysis.is_owner, is_owner);
                        prop_assert_eq!(analysis.has_grant, has_grant);

                        let fetched = registry.fetch_details(&CallContext::new(*name, 1), id);
                        prop_assert_eq!(fetched.is_ok(), is_owner || has_grant);
                    }
                }
            }
        }
    }

    /// Identical creates still receive distinct, consecutive identifiers
    #[test]
    fn identical_creates_get_distinct_ids(count in 1usize..30) {
        let registry = Registry::new(&RegistryConfig::with_root_authority("root"));
        let alice = CallContext::new("alice", 1);

        let ids: Vec<u64> = (0..count)
            .map(|_| registry.create_record(&alice, metadata(true)).unwrap().value())
            .collect();
        let expected: Vec<u64> = (1..=count as u64).collect();
        prop_assert_eq!(ids, expected);
    }
}

#[test]
fn test_concurrent_creates_never_share_an_id() {
    let registry = Registry::new(&RegistryConfig::with_root_authority("root"));
    let per_thread = 50;

    let mut ids: Vec<u64> = std::thread::scope(|scope| {
        let handles: Vec<_> = CAST
            .iter()
            .map(|name| {
                let registry = &registry;
                scope.spawn(move || {
                    let ctx = CallContext::new(*name, 1);
                    (0..per_thread)
                        .map(|_| registry.create_record(&ctx, metadata(true)).unwrap().value())
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        handles
            .into_iter()
            .flat_map(|handle| handle.join().unwrap())
            .collect()
    });

    ids.sort_unstable();
    let expected: Vec<u64> = (1..=(CAST.len() * per_thread) as u64).collect();
    assert_eq!(ids, expected);

    // Every record carries its creator's self-grant
    let snapshot = registry.snapshot();
    assert_eq!(snapshot.grants.len(), CAST.len() * per_thread);
    for record in &snapshot.records {
        assert!(snapshot
            .grants
            .iter()
            .any(|g| g.content_id == record.id && g.principal == record.owner));
    }
}
