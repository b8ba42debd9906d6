/// Violations of the annotation database's structural guarantees.
///
/// These abort the lexical unit being exported; they are never skipped.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum IntegrityError {
    #[error("unknown {table} code: {code}")]
    UnknownCode { table: &'static str, code: i64 },

    #[error("label {label_id} in manual annotation set has no instantiation type")]
    MissingInstantiationType { label_id: i64 },

    #[error("no unannotated annotation set found for sentence {sentence_id}")]
    MissingUnannotatedSet { sentence_id: i64 },

    #[error("{entity} with id {id} not found")]
    MissingRow { entity: &'static str, id: i64 },

    #[error("annotation set {anno_set_id} has no subcorpus")]
    MissingSubcorpus { anno_set_id: i64 },

    #[error("subcorpus {subcorpus_id} is not registered for lexical unit {lu_id}")]
    UnknownSubcorpus { subcorpus_id: i64, lu_id: i64 },

    #[error("label type {label_type_id} has no target table")]
    MissingItemTable { label_type_id: i64 },

    #[error("item table is not allowed: {0}")]
    UnknownItemTable(String),
}
