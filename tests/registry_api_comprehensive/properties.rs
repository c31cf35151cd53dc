//! Property tests over arbitrary record contents.

use crate::*;
use proptest::prelude::*;

fn text() -> impl Strategy<Value = String> {
    "[ -~]{0,24}"
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_create_then_get_returns_inputs(
        name in text(),
        age in any::<i64>(),
        id_type in text(),
        id_no in any::<i64>(),
        address in text(),
    ) {
        let ledger = PersonLedger::new();
        ledger.create(&name, age, &id_type, id_no, &address).unwrap();

        let person = ledger.get_by_id(id_no).unwrap();
        prop_assert_eq!(person, Person::new(&name, age, &id_type, id_no, &address));
        prop_assert_eq!(ledger.state().keys(), vec![id_no.to_string()]);
    }

    #[test]
    fn prop_update_never_touches_identity(
        name in text(),
        id_type in text(),
        id_no in any::<i64>(),
        updates in prop::collection::vec((any::<i64>(), text(), any::<bool>(), any::<bool>()), 1..5),
    ) {
        let ledger = PersonLedger::new();
        ledger.create(&name, 0, &id_type, id_no, "start").unwrap();

        for (age, address, employed, married) in &updates {
            ledger.update(id_no, *age, address, *employed, *married).unwrap();
            let person = ledger.get_by_id(id_no).unwrap();
            prop_assert_eq!(&person.name, &name);
            prop_assert_eq!(&person.id_type, &id_type);
            prop_assert_eq!(person.id_no, id_no);
            prop_assert_eq!(person.age, *age);
            prop_assert_eq!(&person.address, address);
            prop_assert_eq!(person.is_employed, *employed);
            prop_assert_eq!(person.is_married, *married);
        }
    }

    #[test]
    fn prop_get_employed_matches_filter(
        flags in prop::collection::btree_map(0i64..50, (any::<bool>(), any::<bool>()), 0..12),
        wanted in any::<bool>(),
    ) {
        let ledger = PersonLedger::new();
        for (id, (employed, married)) in &flags {
            ledger.create("p", 1, "t", *id, "a").unwrap();
            ledger.update(*id, 1, "a", *employed, *married).unwrap();
        }

        let mut expected: Vec<i64> = flags
            .iter()
            .filter(|(_, (employed, married))| *employed == wanted && !*married)
            .map(|(id, _)| *id)
            .collect();
        expected.sort_by_key(|id| id.to_string());

        match ledger.get_employed(wanted) {
            Ok(people) => prop_assert_eq!(ids(&people), expected),
            Err(e) => {
                prop_assert!(e.is_empty_result());
                prop_assert!(expected.is_empty());
            }
        }
        prop_assert_eq!(ledger.state().open_iterators(), 0);
    }
}
