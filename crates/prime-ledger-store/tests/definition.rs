//! End-to-end checks of the definition lifecycle: provisioning,
//! reapplication, and reopening a database file.

use prime_ledger_core::{Caller, NewPayment, SEED_CATALOG};
use prime_ledger_store::{schema, Store};

#[test]
fn apply_then_reapply_is_idempotent() {
    let store = Store::open_in_memory().unwrap();

    let first = store.apply_definition().unwrap();
    assert_eq!(first.created_tables, schema::TABLES.len());
    assert_eq!(first.created_indexes, schema::INDEXES.len());
    assert_eq!(first.installed_policies, schema::POLICIES.len());
    assert_eq!(first.seeded_programs, 3);

    let second = store.apply_definition().unwrap();
    assert!(second.is_noop(), "reapply created {second:?}");

    let programs = store.list_programs(Caller::anonymous()).unwrap();
    assert_eq!(programs.len(), 3);
}

#[test]
fn definition_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ledger.db");

    {
        let store = Store::open(&path).unwrap();
        store.apply_definition().unwrap();
        store
            .insert_payment(
                Caller::anonymous(),
                &NewPayment::new(
                    "PrimeStart",
                    "Asha Rao",
                    "asha@example.com",
                    "+91 98000 11111",
                    "TXN-PERSIST",
                    5000,
                ),
            )
            .unwrap();
    }

    let store = Store::open(&path).unwrap();
    let outcome = store.apply_definition().unwrap();
    assert!(outcome.is_noop(), "reopen re-created {outcome:?}");

    let payment = store
        .get_payment_by_transaction(Caller::anonymous(), "TXN-PERSIST")
        .unwrap()
        .expect("payment recorded before reopen");
    assert_eq!(payment.amount, 5000);
    assert_eq!(store.list_programs(Caller::anonymous()).unwrap().len(), 3);
}

#[test]
fn catalog_views_match_the_definition() {
    let store = Store::open_in_memory().unwrap();
    store.apply_definition().unwrap();

    let tables = store.table_names().unwrap();
    for (name, _) in schema::TABLES {
        assert!(tables.contains(&(*name).to_string()), "missing table {name}");
    }

    let mut expected_indexes: Vec<String> = schema::INDEXES
        .iter()
        .map(|(name, _)| (*name).to_string())
        .collect();
    expected_indexes.sort();
    assert_eq!(store.index_names().unwrap(), expected_indexes);

    assert_eq!(
        store.row_security_tables().unwrap(),
        vec!["contact_requests".to_string(), "payments".to_string()]
    );

    let policies = store.policies().unwrap();
    assert_eq!(policies.len(), schema::POLICIES.len());
    assert!(policies.iter().all(|p| p.role == "public"));
}

#[test]
fn seeded_rows_match_the_catalog() {
    let store = Store::open_in_memory().unwrap();
    store.apply_definition().unwrap();

    for seed in SEED_CATALOG {
        let program = store
            .get_program_by_name(Caller::anonymous(), seed.name)
            .unwrap()
            .unwrap_or_else(|| panic!("{} not seeded", seed.name));
        assert_eq!(program.price, Some(seed.price));
        assert_eq!(program.original_price, Some(seed.original_price));
        assert_eq!(program.description.as_deref(), Some(seed.description));
        assert_eq!(program.contact_phone.as_deref(), Some(seed.contact_phone));
        assert_eq!(program.contact_whatsapp.as_deref(), Some(seed.contact_whatsapp));
        assert_eq!(program.features, seed.features_json());
    }
}

#[test]
fn seeding_is_keyed_on_name_not_id() {
    let store = Store::open_in_memory().unwrap();
    store.apply_definition().unwrap();

    let before = store.list_programs(Caller::anonymous()).unwrap();
    store.apply_definition().unwrap();
    let after = store.list_programs(Caller::anonymous()).unwrap();

    // Reseeding mints fresh candidate ids, so surviving rows prove the
    // conflict target is the name column.
    assert_eq!(before, after);
}
