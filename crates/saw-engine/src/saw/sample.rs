//! Bundled housing dataset: four equally weighted criteria and five estates.

use super::domain::{Alternative, CalculationRequest, Criterion, Polarity};

pub const HARGA: i64 = 1;
pub const JARAK: i64 = 2;
pub const FASILITAS: i64 = 3;
pub const TRANSPORTASI: i64 = 4;

pub fn housing_criteria() -> Vec<Criterion> {
    vec![
        Criterion::new(HARGA, "Harga", 25.0, Polarity::Cost),
        Criterion::new(JARAK, "Jarak", 25.0, Polarity::Cost),
        Criterion::new(FASILITAS, "Fasilitas", 25.0, Polarity::Benefit),
        Criterion::new(TRANSPORTASI, "Transportasi", 25.0, Polarity::Benefit),
    ]
}

pub fn housing_alternatives() -> Vec<Alternative> {
    [
        (1, "Perumahan Griya Asri", "Bandung, Jawa Barat", 500_000_000.0, 5.2, 8.0, 7.0),
        (2, "Taman Sari Residence", "Jakarta Selatan, DKI Jakarta", 750_000_000.0, 3.1, 9.0, 9.0),
        (3, "Citra Garden City", "Malang, Jawa Timur", 350_000_000.0, 8.5, 6.0, 5.0),
        (4, "Grand Wisata", "Bekasi, Jawa Barat", 450_000_000.0, 12.0, 7.0, 6.0),
        (5, "Permata Hijau Residence", "Yogyakarta, DIY", 600_000_000.0, 4.8, 8.0, 8.0),
    ]
    .into_iter()
    .map(|(id, name, location, harga, jarak, fasilitas, transportasi)| {
        Alternative::new(id, name, location)
            .with_value(HARGA, harga)
            .with_value(JARAK, jarak)
            .with_value(FASILITAS, fasilitas)
            .with_value(TRANSPORTASI, transportasi)
    })
    .collect()
}

pub fn housing_request() -> CalculationRequest {
    CalculationRequest {
        alternatives: housing_alternatives(),
        criterias: housing_criteria(),
    }
}
