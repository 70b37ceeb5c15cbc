use beerxml_fermentable::{sort_unique, Fermentable, FermentableType};
use std::cmp::Ordering;

fn sample_set() -> Vec<Fermentable> {
    let mut items = Vec::new();
    for name in ["", "Amber Malt", "amber malt", "Brown Sugar", "Zwickel", "Ämber"] {
        for kind in FermentableType::ALL {
            items.push(Fermentable::named(name, kind));
        }
    }
    // Same keys as existing entries but different values
    let mut heavy = Fermentable::named("Amber Malt", FermentableType::Grain);
    heavy.set_amount_kg(12.0);
    items.push(heavy);
    items
}

#[test]
fn test_ordering_is_irreflexive() {
    for a in sample_set() {
        assert!(!(a < a));
        assert_eq!(a.cmp(&a), Ordering::Equal);
    }
}

#[test]
fn test_ordering_is_asymmetric() {
    let items = sample_set();
    for a in &items {
        for b in &items {
            assert!(!(a < b && b < a), "{:?} / {:?}", a.name(), b.name());
        }
    }
}

#[test]
fn test_ordering_is_transitive() {
    let items = sample_set();
    for a in &items {
        for b in &items {
            for c in &items {
                if a < b && b < c {
                    assert!(a < c);
                }
            }
        }
    }
}

#[test]
fn test_equality_is_consistent_with_ordering() {
    let items = sample_set();
    for a in &items {
        for b in &items {
            let equal = a == b;
            let incomparable = !(a < b) && !(b < a);
            assert_eq!(equal, incomparable, "{:?} / {:?}", a.name(), b.name());
        }
    }
}

#[test]
fn test_name_orders_before_type() {
    let grain = Fermentable::named("Zwickel", FermentableType::Grain);
    let adjunct = Fermentable::named("Amber Malt", FermentableType::Adjunct);
    assert!(adjunct < grain);

    let sugar = Fermentable::named("Amber Malt", FermentableType::Sugar);
    assert!(sugar < adjunct);
}

#[test]
fn test_sort_unique_on_sample_set() {
    let sorted = sort_unique(sample_set());
    // 6 names x 5 types, the extra Amber Malt grain is a duplicate
    assert_eq!(sorted.len(), 30);
    assert!(sorted.windows(2).all(|w| w[0] < w[1]));

    let amber = sorted
        .iter()
        .find(|f| f.name() == "Amber Malt" && f.kind() == FermentableType::Grain)
        .unwrap();
    assert_eq!(amber.amount_kg(), 0.0);
}

#[test]
fn test_references_sort_like_values() {
    let a = Fermentable::named("Oats", FermentableType::Adjunct);
    let b = Fermentable::named("Barley", FermentableType::Grain);
    let mut refs = vec![&a, &b];
    refs.sort();
    assert_eq!(refs[0].name(), "Barley");

    let mut boxed = vec![Box::new(a.clone()), Box::new(b.clone())];
    boxed.sort();
    assert_eq!(boxed[0].name(), "Barley");
    assert!(boxed.contains(&Box::new(Fermentable::named("Oats", FermentableType::Adjunct))));
}
