use crate::bio::QuerySequence;
use crate::ConservationError;
use std::fmt::Write as _;
use std::path::Path;

/// Render one `<index>\t<value>\t<residue>` line per residue.
///
/// `values` must hold exactly one entry per residue.
pub fn render_features<S: AsRef<str>>(
    sequence: &QuerySequence,
    values: &[S],
) -> Result<String, ConservationError> {
    let residues = sequence.len();
    if residues != values.len() {
        return Err(ConservationError::FeatureCount {
            residues,
            values: values.len(),
        });
    }

    let mut output = String::with_capacity(residues * 12);
    for (index, (residue, value)) in sequence.residues().zip(values).enumerate() {
        let value: &str = value.as_ref();
        writeln!(&mut output, "{}\t{}\t{}", index, value, residue)
            .map_err(|e| ConservationError::Parse(e.to_string()))?;
    }
    Ok(output)
}

/// Write a per-residue feature table to `target`, replacing any existing file.
pub fn write_feature<S: AsRef<str>>(
    target: &Path,
    sequence: &QuerySequence,
    values: &[S],
) -> Result<(), ConservationError> {
    let rendered = render_features(sequence, values)?;
    std::fs::write(target, rendered)?;
    Ok(())
}
