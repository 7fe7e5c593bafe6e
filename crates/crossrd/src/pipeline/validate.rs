use serde_json::Value;

/// How many leading tracks get their score range checked.
const SCORE_SAMPLE: usize = 5;
const SCORE_FLOOR: f64 = 0.5;
const SCORE_CEILING: f64 = 10.5;
const REQUIRED_FACETS: [&str; 5] = ["scores", "scenario_totals", "financial", "stress", "timeline"];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    pub total_tracks: u64,
    pub errors: Vec<String>,
}

impl ValidationReport {
    pub fn passed(&self) -> bool {
        self.errors.is_empty()
    }
}

fn is_filled(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Object(map)) => !map.is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::String(text)) => !text.is_empty(),
        Some(_) => true,
    }
}

/// Structural sanity checks on a written family document.
pub fn validate(document: &Value) -> ValidationReport {
    let mut report = ValidationReport {
        total_tracks: document["meta"]["total_tracks"].as_u64().unwrap_or(0),
        errors: Vec::new(),
    };

    if report.total_tracks < 1 {
        report.errors.push("no tracks found".to_string());
    }
    if !is_filled(document.get("careers")) {
        report.errors.push("no careers array in output".to_string());
    }

    let Some(tracks) = document.get("tracks").and_then(Value::as_array) else {
        report.errors.push("no tracks array in output".to_string());
        return report;
    };

    // only the first incomplete track is reported
    'tracks: for track in tracks {
        let name = track["name"].as_str().unwrap_or("<unnamed>");
        for facet in REQUIRED_FACETS {
            if !is_filled(track.get(facet)) {
                report
                    .errors
                    .push(format!("track '{name}' missing {facet}"));
                break 'tracks;
            }
        }
    }

    for track in tracks.iter().take(SCORE_SAMPLE) {
        let name = track["name"].as_str().unwrap_or("<unnamed>");
        let Some(scores) = track.get("scores").and_then(Value::as_object) else {
            continue;
        };
        for (category, score) in scores {
            match score.as_f64() {
                Some(score) if (SCORE_FLOOR..=SCORE_CEILING).contains(&score) => {}
                _ => report
                    .errors
                    .push(format!("track '{name}' {category} out of range: {score}")),
            }
        }
    }

    report
}
