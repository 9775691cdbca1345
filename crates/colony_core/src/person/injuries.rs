use serde::Serialize;

use crate::record::Record;

const SURGICAL_CAUSE: &str = "SurgicalCut";

// Flattened human body part indices as written in `part/index`.
#[rustfmt::skip]
const BODY_PARTS: &[(u32, &str)] = &[
    ( 0, "Torso"),
    ( 1, "Sternum"),
    (14, "Pelvis"),
    (15, "Spine"),
    (16, "Stomach"),
    (17, "Heart"),
    (18, "Left Lung"),
    (19, "Right Lung"),
    (20, "Left Kidney"),
    (21, "Right Kidney"),
    (22, "Liver"),
    (23, "Neck"),
    (24, "Head"),
    (25, "Skull"),
    (26, "Brain"),
    (27, "Left Eye"),
    (28, "Right Eye"),
    (29, "Left Ear"),
    (30, "Right Ear"),
    (31, "Nose"),
    (32, "Jaw"),
    (33, "Left Shoulder"),
    (35, "Left Arm"),
    (38, "Left Hand"),
    (39, "Left Pinky"),
    (40, "Left Ring Finger"),
    (41, "Left Middle Finger"),
    (42, "Left Index Finger"),
    (43, "Left Thumb"),
    (44, "Right Shoulder"),
    (46, "Right Arm"),
    (49, "Right Hand"),
    (50, "Right Pinky"),
    (51, "Right Ring Finger"),
    (52, "Right Middle Finger"),
    (53, "Right Index Finger"),
    (54, "Right Thumb"),
    (55, "Waist"),
    (56, "Left Leg"),
    (59, "Left Foot"),
    (65, "Right Leg"),
    (68, "Right Foot"),
];

pub fn body_part_name(index: u32) -> Option<&'static str> {
    BODY_PARTS
        .iter()
        .find(|(i, _)| *i == index)
        .map(|(_, name)| *name)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Injury {
    pub label: String,
    pub severity: f64,
}

/// Where one health condition lands. Every condition gets exactly one outcome.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Excluded,
    Permanent {
        injury: Injury,
        /// Raw part index when the body-part table has no name for it.
        unmapped_part: Option<String>,
    },
    Temporary(Injury),
}

fn is_noise(def: &str) -> bool {
    def.is_empty()
        || def.starts_with("Bionic")
        || def.ends_with("Tolerance")
        || def == "CochlearImplant"
}

fn is_permanent_flagged(record: &Record<'_, '_>) -> bool {
    record.flag(&["isPermanent"])
        || record
            .list(&["comps"])
            .iter()
            .any(|comp| comp.flag(&["isPermanent"]))
}

fn with_part(def: &str, part: Option<&str>) -> String {
    match part {
        Some(part) => format!("{def} ({part})"),
        None => def.to_string(),
    }
}

pub fn classify_condition(record: &Record<'_, '_>) -> Condition {
    let def = record.get_or(&["def"], "");
    if is_noise(def) {
        return Condition::Excluded;
    }

    let severity: f64 = record.parse(&["severity"]).unwrap_or(0.0);
    let surgical = record.resolve(&["lastInjury"]) == Some(SURGICAL_CAUSE);
    let raw_part = record.resolve(&["part", "index"]);
    let part_name = raw_part
        .and_then(|raw| raw.parse::<u32>().ok())
        .and_then(body_part_name);

    if def == "MissingBodyPart" || def == "Asthma" {
        if surgical {
            return Condition::Excluded;
        }
        let unmapped_part = match (part_name, raw_part) {
            (None, Some(raw)) => Some(raw.to_string()),
            _ => None,
        };
        let part = part_name.or(raw_part);
        let label = match (def, part) {
            ("MissingBodyPart", Some(part)) => format!("Missing {part}"),
            ("MissingBodyPart", None) => "Missing Body Part".to_string(),
            (_, part) => with_part(def, part),
        };
        return Condition::Permanent {
            injury: Injury { label, severity },
            unmapped_part,
        };
    }

    if def.ends_with("Addiction") {
        return Condition::Permanent {
            injury: Injury {
                label: def.to_string(),
                severity,
            },
            unmapped_part: None,
        };
    }

    if is_permanent_flagged(record) {
        if surgical {
            return Condition::Excluded;
        }
        return Condition::Permanent {
            injury: Injury {
                label: with_part(def, part_name),
                severity,
            },
            unmapped_part: None,
        };
    }

    Condition::Temporary(Injury {
        label: with_part(def, part_name),
        severity,
    })
}

#[cfg(test)]
mod tests {
    use roxmltree::Document;

    use super::*;

    fn classify(xml: &str) -> Condition {
        let doc = Document::parse(xml).expect("fixture xml should parse");
        classify_condition(&Record::new(doc.root_element()))
    }

    #[test]
    fn prosthetics_and_tolerances_are_excluded() {
        for def in ["", "BionicArm", "AlcoholTolerance", "CochlearImplant"] {
            let xml = format!("<li><def>{def}</def></li>");
            assert_eq!(classify(&xml), Condition::Excluded, "{def}");
        }
    }

    #[test]
    fn missing_parts_use_body_part_table() {
        let mapped = classify("<li><def>MissingBodyPart</def><part><index>38</index></part></li>");
        assert_eq!(
            mapped,
            Condition::Permanent {
                injury: Injury {
                    label: "Missing Left Hand".into(),
                    severity: 0.0
                },
                unmapped_part: None,
            }
        );

        let unmapped = classify("<li><def>MissingBodyPart</def><part><index>61</index></part></li>");
        assert_eq!(
            unmapped,
            Condition::Permanent {
                injury: Injury {
                    label: "Missing 61".into(),
                    severity: 0.0
                },
                unmapped_part: Some("61".into()),
            }
        );
    }

    #[test]
    fn surgical_removals_are_excluded() {
        assert_eq!(
            classify("<li><def>MissingBodyPart</def><lastInjury>SurgicalCut</lastInjury><part><index>18</index></part></li>"),
            Condition::Excluded
        );
        assert_eq!(
            classify("<li><def>Cut</def><isPermanent>True</isPermanent><lastInjury>SurgicalCut</lastInjury></li>"),
            Condition::Excluded
        );
    }

    #[test]
    fn addictions_and_scars_are_permanent() {
        assert!(matches!(
            classify("<li><def>AlcoholAddiction</def><severity>0.4</severity></li>"),
            Condition::Permanent { injury, .. } if injury.label == "AlcoholAddiction"
        ));
        assert!(matches!(
            classify("<li><def>Gunshot</def><part><index>0</index></part><comps><li><isPermanent>True</isPermanent></li></comps></li>"),
            Condition::Permanent { injury, .. } if injury.label == "Gunshot (Torso)"
        ));
    }

    #[test]
    fn everything_else_is_temporary() {
        assert_eq!(
            classify("<li><def>Cut</def><severity>3.5</severity><part><index>56</index></part></li>"),
            Condition::Temporary(Injury {
                label: "Cut (Left Leg)".into(),
                severity: 3.5
            })
        );
        assert_eq!(
            classify("<li><def>Flu</def><severity>0.2</severity></li>"),
            Condition::Temporary(Injury {
                label: "Flu".into(),
                severity: 0.2
            })
        );
    }
}
