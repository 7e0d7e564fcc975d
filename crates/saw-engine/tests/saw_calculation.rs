use saw_engine::report::ranking_csv_string;
use saw_engine::saw::sample::{housing_alternatives, housing_criteria, FASILITAS, HARGA, JARAK};
use saw_engine::saw::{
    calculate, Alternative, AlternativeId, Criterion, CriterionId, Polarity, SawEngine, SawResult,
    ValidationError,
};
use serde_json::json;

fn three_estates() -> Vec<Alternative> {
    housing_alternatives().into_iter().take(3).collect()
}

fn entry(result: &SawResult, id: i64) -> &saw_engine::saw::NormalizedAlternative {
    result
        .normalized_alternatives
        .iter()
        .find(|alternative| alternative.id == AlternativeId(id))
        .expect("alternative ranked")
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn three_estate_scenario_matches_hand_computation() {
    let result = calculate(&three_estates(), &housing_criteria()).expect("weights total 100");

    let griya = entry(&result, 1);
    let taman = entry(&result, 2);
    let citra = entry(&result, 3);

    assert_close(griya.normalized(CriterionId(HARGA)), 0.7);
    assert_close(citra.normalized(CriterionId(HARGA)), 1.0);
    assert_close(taman.normalized(CriterionId(JARAK)), 1.0);
    assert_close(griya.normalized(CriterionId(JARAK)), 3.1 / 5.2);
    assert_close(citra.normalized(CriterionId(FASILITAS)), 6.0 / 9.0);

    assert_close(griya.final_score, (0.7 + 3.1 / 5.2 + 8.0 / 9.0 + 7.0 / 9.0) / 4.0);
    assert_close(taman.final_score, (350.0 / 750.0 + 3.0) / 4.0);
    assert_close(citra.final_score, (1.0 + 3.1 / 8.5 + 6.0 / 9.0 + 5.0 / 9.0) / 4.0);

    let mut rankings: Vec<u32> = result
        .normalized_alternatives
        .iter()
        .map(|alternative| alternative.ranking)
        .collect();
    rankings.sort_unstable();
    assert_eq!(rankings, vec![1, 2, 3]);

    let order: Vec<i64> = result
        .normalized_alternatives
        .iter()
        .map(|alternative| alternative.id.0)
        .collect();
    assert_eq!(order, vec![2, 1, 3]);
}

#[test]
fn full_dataset_ranks_taman_sari_first() {
    let result = calculate(&housing_alternatives(), &housing_criteria()).expect("calculates");

    let order: Vec<i64> = result
        .normalized_alternatives
        .iter()
        .map(|alternative| alternative.id.0)
        .collect();
    assert_eq!(order, vec![2, 5, 1, 3, 4]);

    let best = result.best_alternative.as_ref().expect("best present");
    assert_eq!(best.name, "Taman Sari Residence");
    assert_eq!(best, &result.normalized_alternatives[0]);
}

#[test]
fn weights_not_totalling_one_hundred_are_rejected() {
    let mut criteria = housing_criteria();
    criteria[0].weight = 30.0;

    let err = calculate(&housing_alternatives(), &criteria).expect_err("rejected");

    assert_eq!(err, ValidationError::WeightTotal { total: 105.0 });
    assert_eq!(
        err.to_string(),
        "criterion weights must total 100%, current total: 105%"
    );
}

#[test]
fn empty_alternatives_serialize_null_best() {
    let result = calculate(&[], &housing_criteria()).expect("valid weights");

    let json = serde_json::to_value(&result).expect("serializes");

    assert_eq!(json["normalizedAlternatives"], json!([]));
    assert!(json["bestAlternative"].is_null());
    assert_eq!(json["criterias"].as_array().map(Vec::len), Some(4));
}

#[test]
fn repeated_runs_are_identical() {
    let engine = SawEngine::default();
    let alternatives = housing_alternatives();
    let criteria = housing_criteria();

    let first = engine.calculate(&alternatives, &criteria).expect("calculates");
    let second = engine.calculate(&alternatives, &criteria).expect("calculates");

    assert_eq!(first, second);
    assert_eq!(alternatives, housing_alternatives());
}

#[test]
fn criteria_are_resolved_by_id_not_name() {
    let criteria = vec![
        Criterion::new(10, "Price", 50.0, Polarity::Cost),
        Criterion::new(20, "Amenities", 50.0, Polarity::Benefit),
    ];
    let alternatives = vec![
        Alternative::new(1, "North", "A").with_value(20, 4.0).with_value(10, 200.0),
        Alternative::new(2, "South", "B").with_value(10, 100.0).with_value(20, 8.0),
    ];

    let result = calculate(&alternatives, &criteria).expect("calculates");

    let best = result.best_alternative.expect("best present");
    assert_eq!(best.id, AlternativeId(2));
    assert_close(best.final_score, 1.0);
    assert_close(entry_score(&result.normalized_alternatives, 1), 0.5);
}

fn entry_score(entries: &[saw_engine::saw::NormalizedAlternative], id: i64) -> f64 {
    entries
        .iter()
        .find(|alternative| alternative.id == AlternativeId(id))
        .map(|alternative| alternative.final_score)
        .unwrap_or(f64::NAN)
}

#[test]
fn boundary_json_round_trips_through_engine() {
    let request = json!({
        "alternatives": [
            { "id": 1, "nama": "Griya Asri", "lokasi": "Bandung", "gambar": "/img/griya.jpg",
              "values": [{ "criteriaId": 1, "nilai": 8 }] },
            { "id": 2, "nama": "Grand Wisata", "lokasi": "Bekasi",
              "values": [{ "criteriaId": 1, "nilai": 4 }] }
        ],
        "criterias": [{ "id": 1, "nama": "Fasilitas", "bobot": 100, "tipe": "benefit" }]
    });
    let request: saw_engine::saw::CalculationRequest =
        serde_json::from_value(request).expect("parses");

    let result = calculate(&request.alternatives, &request.criterias).expect("calculates");
    let json = serde_json::to_value(&result).expect("serializes");

    assert_eq!(json["bestAlternative"]["gambar"], json!("/img/griya.jpg"));
    assert_eq!(json["normalizedAlternatives"][1]["normalizedValues"]["1"], json!(0.5));
    assert_eq!(json["normalizedAlternatives"][1]["ranking"], json!(2));
    assert_eq!(json["criterias"][0]["tipe"], json!("benefit"));
}

#[test]
fn ranking_export_lists_every_alternative() {
    let result = calculate(&housing_alternatives(), &housing_criteria()).expect("calculates");

    let csv = ranking_csv_string(&result).expect("csv renders");
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(lines.len(), 6);
    assert_eq!(
        lines[0],
        "ranking,id,nama,lokasi,Harga,Jarak,Fasilitas,Transportasi,final_score"
    );
    assert!(lines[1].starts_with("1,2,Taman Sari Residence,"));
    assert!(lines[1].ends_with(",0.8667"));
}
