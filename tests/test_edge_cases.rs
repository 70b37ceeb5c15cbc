use beerxml_fermentable::{
    load_fermentables, parse_fermentables, parse_fermentables_with, save_fermentables,
    total_equiv_sucrose_kg, Fermentable, FermentableError, FermentableField, FermentableObserver,
    FermentableType, ObjectId, ParseConfig, TypePolicy,
};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct Recorder {
    seen: Mutex<Vec<(ObjectId, FermentableField)>>,
}

impl FermentableObserver for Recorder {
    fn changed(&self, source: ObjectId, field: FermentableField) {
        self.seen.lock().unwrap().push((source, field));
    }
}

fn record(name: &str, kind: &str) -> String {
    format!(
        "<FERMENTABLE><NAME>{}</NAME><VERSION>1</VERSION><TYPE>{}</TYPE></FERMENTABLE>",
        name, kind
    )
}

#[test]
fn test_unknown_type_token_defaults_to_grain() {
    for token in ["Fruit", "grain", "DryExtract", "Dry  Extract", "5"] {
        let xml = format!("<FERMENTABLES>{}</FERMENTABLES>", record("Odd", token));
        let fermentables = parse_fermentables(&xml).unwrap();
        assert_eq!(fermentables[0].kind(), FermentableType::Grain, "{}", token);
    }
}

#[test]
fn test_unknown_type_token_rejected_when_configured() {
    let config = ParseConfig {
        type_policy: TypePolicy::Reject,
        ..Default::default()
    };
    let xml = format!(
        "<FERMENTABLES>{}{}</FERMENTABLES>",
        record("Honey", "Sugar"),
        record("Cherries", "Fruit")
    );

    let err = parse_fermentables_with(&xml, &config).unwrap_err();
    assert!(matches!(err, FermentableError::InvalidClassification(ref t) if t == "Fruit"));
    assert!(!err.is_format());
}

#[test]
fn test_all_five_tokens_are_accepted() {
    let records: String = ["Grain", "Sugar", "Extract", "Dry Extract", "Adjunct"]
        .iter()
        .map(|t| record(t, t))
        .collect();
    let xml = format!("<FERMENTABLES>{}</FERMENTABLES>", records);

    let config = ParseConfig::strict();
    let kinds: Vec<FermentableType> = parse_fermentables_with(&xml, &config)
        .unwrap()
        .iter()
        .map(Fermentable::kind)
        .collect();
    assert_eq!(kinds, FermentableType::ALL.to_vec());
}

#[test]
fn test_malformed_documents_are_format_errors() {
    let cases = [
        "",
        "not xml at all",
        "<FERMENTABLES><FERMENTABLE><NAME>x</NAME></FERMENTABLES>",
        "<FERMENTABLES><FERMENTABLE>",
        "<HOPS><HOP/></HOPS>",
        "<FERMENTABLE><AMOUNT>1,5</AMOUNT></FERMENTABLE>",
    ];
    for case in cases {
        let err = parse_fermentables(case).unwrap_err();
        assert!(err.is_format(), "{:?} gave {:?}", case, err);
    }
}

#[test]
fn test_other_children_are_ignored() {
    let xml = format!(
        "<FERMENTABLES><!-- note --><MISC/>{}</FERMENTABLES>",
        record("Munich", "Grain")
    );
    let fermentables = parse_fermentables(&xml).unwrap();
    assert_eq!(fermentables.len(), 1);
    assert_eq!(fermentables[0].name(), "Munich");
}

#[test]
fn test_empty_list() {
    assert!(parse_fermentables("<FERMENTABLES/>").unwrap().is_empty());
    assert!(parse_fermentables("<FERMENTABLES></FERMENTABLES>")
        .unwrap()
        .is_empty());
}

#[test]
fn test_parsed_records_notify_after_attach() {
    let mut fermentables = parse_fermentables(&record("Vienna", "Grain")).unwrap();
    let f = &mut fermentables[0];
    assert_eq!(f.observer_count(), 0);

    let recorder = Arc::new(Recorder::default());
    f.attach(recorder.clone());
    f.set_amount_kg(2.0);
    f.set_kind(FermentableType::Grain);
    f.set_kind(FermentableType::Adjunct);

    let seen = recorder.seen.lock().unwrap();
    assert_eq!(
        *seen,
        vec![
            (f.id(), FermentableField::Amount),
            (f.id(), FermentableField::Type)
        ]
    );
}

#[test]
fn test_one_observer_on_many_records() {
    let recorder = Arc::new(Recorder::default());
    let mut a = Fermentable::named("A", FermentableType::Grain);
    let mut b = Fermentable::named("B", FermentableType::Sugar);
    a.attach(recorder.clone());
    b.attach(recorder.clone());

    a.set_protein_pct(11.0);
    b.set_moisture_pct(0.5);

    let seen = recorder.seen.lock().unwrap();
    assert_eq!(
        *seen,
        vec![
            (a.id(), FermentableField::Protein),
            (b.id(), FermentableField::Moisture)
        ]
    );
}

#[test]
fn test_save_and_load_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fermentables.xml");

    let mut sugar = Fermentable::named("Table Sugar", FermentableType::Sugar);
    sugar.set_amount_kg(2.5);
    sugar.set_yield_pct(100.0);
    let mut malt = Fermentable::named("Maris Otter", FermentableType::Grain);
    malt.set_amount_kg(4.0);
    malt.set_yield_pct(80.0);

    save_fermentables(&path, &[sugar, malt]).unwrap();
    let loaded = load_fermentables(&path, &ParseConfig::default()).unwrap();

    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded[0].equiv_sucrose_kg(), 2.5);
    assert!((total_equiv_sucrose_kg(&loaded) - 5.7).abs() < 1e-9);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_fermentables(&dir.path().join("absent.xml"), &ParseConfig::default())
        .unwrap_err();
    assert!(matches!(err, FermentableError::Io(_)));
}
