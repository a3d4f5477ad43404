use std::io::Write;

use crate::domain::{ComparisonResultSet, FaceDescriptor};

/// Writes the face reference and every comparison, flagging likely matches.
pub fn write_summary<W: Write>(out: &mut W, faces: &[FaceDescriptor], results: &ComparisonResultSet) -> std::io::Result<()> {
    writeln!(out, "\nFace Reference:")?;
    for face in faces {
        writeln!(out, "Face {}: {}", face.index, face.token)?;
    }

    writeln!(out, "\nComparison Results:")?;
    for comparison in &results.comparisons {
        writeln!(out, "Face {} ({}) and Face {} ({}): {:?}% similar",
            comparison.face1.number, comparison.face1.token,
            comparison.face2.number, comparison.face2.token,
            comparison.confidence)?;
        if comparison.is_high_similarity() {
            writeln!(out, "⚠️  High similarity detected!")?;
        }
    }
    writeln!(out, "\nTotal comparisons: {}", results.comparisons.len())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ComparedFace, ComparisonRecord, FaceRectangle};

    #[test]
    fn flags_high_similarity() {
        let faces: Vec<FaceDescriptor> = (1..=2).map(|index| FaceDescriptor {
            index,
            token: format!("t{index}"),
            rectangle: FaceRectangle { left: 0, top: 0, width: 1, height: 1 },
        }).collect();
        let mut results = ComparisonResultSet::new("2024-01-01T00:00:00".into());
        results.comparisons.push(ComparisonRecord {
            face1: ComparedFace { number: 1, token: "t1".into() },
            face2: ComparedFace { number: 2, token: "t2".into() },
            confidence: 91.5,
        });

        let mut out = Vec::new();
        write_summary(&mut out, &faces, &results).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Face 2: t2\n"));
        assert!(text.contains("Face 1 (t1) and Face 2 (t2): 91.5% similar\n⚠️  High similarity detected!"));
        assert!(text.ends_with("Total comparisons: 1\n"));
    }

    #[test]
    fn whole_confidence_keeps_decimal() {
        let mut results = ComparisonResultSet::new(String::new());
        results.comparisons.push(ComparisonRecord {
            face1: ComparedFace { number: 1, token: "t1".into() },
            face2: ComparedFace { number: 3, token: "t3".into() },
            confidence: 95.0,
        });
        let mut out = Vec::new();
        write_summary(&mut out, &[], &results).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("Face 1 (t1) and Face 3 (t3): 95.0% similar\n"));
    }

    #[test]
    fn empty_results_report_zero() {
        let results = ComparisonResultSet::new(String::new());
        let mut out = Vec::new();
        write_summary(&mut out, &[], &results).unwrap();
        assert!(String::from_utf8(out).unwrap().ends_with("Total comparisons: 0\n"));
    }
}
