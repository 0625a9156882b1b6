use std::io;
use std::path::PathBuf;

/// Everything that can go wrong while flattening one stats file.
///
/// The first three variants are the anticipated per-file failures: a batch run
/// recovers from them by logging and contributing an empty record for that
/// file. `MalformedRow` is a structural fault in the input and aborts the run.
#[derive(Debug, thiserror::Error)]
pub enum FlattenError {
    #[error("no ColHeaders header line in {path}")]
    MissingHeader { path: PathBuf },

    #[error("cannot read {path}: {source}")]
    FileAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no column {name}")]
    MissingColumn { name: String },

    #[error("data row {line} has {found} fields, header declares {expected}")]
    MalformedRow {
        line: usize,
        expected: usize,
        found: usize,
    },
}

impl FlattenError {
    /// Whether a batch run should log this failure and keep going.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, FlattenError::MalformedRow { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recoverable_kinds() {
        assert!(FlattenError::MissingHeader {
            path: "aseg.stats".into()
        }
        .is_recoverable());
        assert!(FlattenError::MissingColumn {
            name: "StructName".into()
        }
        .is_recoverable());
        assert!(FlattenError::FileAccess {
            path: "gone.stats".into(),
            source: io::Error::new(io::ErrorKind::NotFound, "gone"),
        }
        .is_recoverable());
        assert!(!FlattenError::MalformedRow {
            line: 80,
            expected: 10,
            found: 12,
        }
        .is_recoverable());
    }

    #[test]
    fn messages_name_the_offender() {
        let err = FlattenError::MissingHeader {
            path: "sub-01/stats/aseg.stats".into(),
        };
        assert!(err.to_string().contains("sub-01/stats/aseg.stats"));

        let err = FlattenError::MissingColumn {
            name: "StructName".into(),
        };
        assert!(err.to_string().contains("StructName"));
    }
}
