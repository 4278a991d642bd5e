use heredity::{
    load_pedigree, write_report, EnumerationEngine, GeneticModel, HeredityError, MalformedPedigree,
    MarginalInferenceEngine, Marginals, Pedigree, PedigreeBuilder, PersonRecord,
};

use std::path::PathBuf;

fn infer(pedigree: &Pedigree) -> Marginals {
    let model = GeneticModel::default();
    EnumerationEngine::new(pedigree, &model).infer().expect("inference failed")
}

fn assert_close(expected: f64, actual: f64, tol: f64) {
    assert!((expected - actual).abs() < tol, "expected {} got {}", expected, actual);
}

fn family() -> Pedigree {
    PedigreeBuilder::new()
        .with_child("Harry", "Lily", "James", None)
        .with_founder("James", Some(true))
        .with_founder("Lily", Some(false))
        .build()
        .expect("valid pedigree")
}

#[test]
fn two_observed_founders_match_closed_form() {
    let pedigree = PedigreeBuilder::new()
        .with_founder("A", Some(true))
        .with_founder("B", Some(false))
        .build()
        .expect("valid pedigree");
    let model = GeneticModel::default();
    let marginals = infer(&pedigree);

    for (name, observed) in vec![("A", true), ("B", false)] {
        let weights: Vec<f64> = (0..3)
            .map(|g| model.founder_prior(g) * model.trait_probability(g, observed))
            .collect();
        let z: f64 = weights.iter().sum();

        let m = marginals.get(name).expect("missing person");
        for g in 0..3 {
            assert_close(weights[g] / z, m.gene_probability(g), 1e-9);
        }
        assert_eq!(1.0, m.trait_probability(observed));
        assert_eq!(0.0, m.trait_probability(!observed));
    }
}

#[test]
/// Reference values for a child of one affected and one unaffected parent, to four decimals
fn child_of_observed_parents() {
    let marginals = infer(&family());

    let harry = marginals.get("Harry").expect("missing Harry");
    assert_close(0.0092, harry.gene_probability(2), 5e-5);
    assert_close(0.4557, harry.gene_probability(1), 5e-5);
    assert_close(0.5351, harry.gene_probability(0), 5e-5);
    assert_close(0.2665, harry.trait_probability(true), 5e-5);
    assert_close(0.7335, harry.trait_probability(false), 5e-5);

    let james = marginals.get("James").expect("missing James");
    assert_close(0.1976, james.gene_probability(2), 5e-5);
    assert_close(0.5106, james.gene_probability(1), 5e-5);
    assert_close(0.2918, james.gene_probability(0), 5e-5);
    assert_eq!(1.0, james.trait_probability(true));

    let lily = marginals.get("Lily").expect("missing Lily");
    assert_close(0.0036, lily.gene_probability(2), 5e-5);
    assert_close(0.9827, lily.gene_probability(0), 5e-5);
    assert_eq!(1.0, lily.trait_probability(false));
}

#[test]
fn three_generations_are_normalized() {
    let pedigree = Pedigree::from_records(vec![
        ("Arthur", PersonRecord::founder(Some(false))),
        ("Molly", PersonRecord::founder(None)),
        ("Ron", PersonRecord::child("Molly", "Arthur", None)),
        ("Hermione", PersonRecord::founder(Some(false))),
        ("Rose", PersonRecord::child("Hermione", "Ron", Some(true))),
    ])
    .expect("valid pedigree");

    let marginals = infer(&pedigree);
    assert_eq!(5, marginals.len());

    for (name, m) in marginals.iter() {
        let genes: f64 = (0..3).map(|g| m.gene_probability(g)).sum();
        let traits = m.trait_probability(true) + m.trait_probability(false);
        assert_close(1.0, genes, 1e-9);
        assert_close(1.0, traits, 1e-9);
        assert!(m.genes().iter().all(|&p| p >= 0.0), "{} has a negative probability", name);
    }

    assert_eq!(1.0, marginals.get("Rose").expect("missing Rose").trait_probability(true));
}

#[test]
fn inference_is_repeatable() {
    let pedigree = family();
    let first = infer(&pedigree);
    let second = infer(&pedigree);

    assert_eq!(first, second);
}

#[test]
fn malformed_input_fails_before_inference() {
    let result = Pedigree::from_records(vec![
        ("Harry", PersonRecord { mother: Some(String::from("Lily")), ..PersonRecord::default() }),
        ("Lily", PersonRecord::founder(None)),
    ]);

    match result {
        Err(HeredityError::MalformedPedigree(MalformedPedigree::SingleParent(name))) => {
            assert_eq!("Harry", name)
        }
        _ => panic!("accepted a single parent"),
    }
}

#[test]
fn csv_to_report() {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data").join("family.csv");
    let pedigree = load_pedigree(&path).expect("failed to load sample data");
    let marginals = infer(&pedigree);

    let mut out = Vec::new();
    write_report(&marginals, &mut out).expect("failed to write report");
    let text = String::from_utf8(out).expect("report is not UTF-8");

    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(24, lines.len());
    assert_eq!("Harry:", lines[0]);
    assert_eq!("    2: 0.0092", lines[2]);
    assert_eq!("    True: 0.2665", lines[6]);
    assert_eq!("James:", lines[8]);
    assert_eq!("Lily:", lines[16]);
}

#[test]
fn custom_model_changes_result() {
    let model = GeneticModel::from_toml_str("mutation = 0.0").expect("valid model");
    let pedigree = PedigreeBuilder::new()
        .with_founder("M", None)
        .with_founder("F", None)
        .with_child("C", "M", "F", Some(true))
        .build()
        .expect("valid pedigree");

    let marginals = EnumerationEngine::new(&pedigree, &model).infer().expect("inference failed");
    let m = marginals.get("M").expect("missing M");
    let default = infer(&pedigree);

    assert!(m.gene_probability(0) < default.get("M").expect("missing M").gene_probability(0));
}
