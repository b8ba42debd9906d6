use serde::{Deserialize, Serialize};

use crate::error::IntegrityError;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum AnnoStatus {
    #[serde(rename = "UNANN")]
    Unannotated,
    #[serde(rename = "MANUAL")]
    Manual,
}

impl AnnoStatus {
    pub fn code(self) -> i64 {
        match self {
            Self::Unannotated => 1,
            Self::Manual => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unannotated => "UNANN",
            Self::Manual => "MANUAL",
        }
    }

    /// Layer types a set with this status contributes to the export.
    pub fn allowed_layer_types(self) -> &'static [LayerType] {
        match self {
            Self::Manual => &MANUAL_LAYER_TYPES,
            Self::Unannotated => &POS_LAYER_TYPES,
        }
    }
}

impl TryFrom<i64> for AnnoStatus {
    type Error = IntegrityError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Self::Unannotated),
            2 => Ok(Self::Manual),
            _ => Err(IntegrityError::UnknownCode {
                table: "annotation status",
                code,
            }),
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum LayerType {
    FrameElement,
    Target,
    GrammaticalFunction,
    PhraseType,
    Bnc,
    Penn,
    Scpos,
    Hepple,
}

pub const MANUAL_LAYER_TYPES: [LayerType; 4] = [
    LayerType::FrameElement,
    LayerType::Target,
    LayerType::GrammaticalFunction,
    LayerType::PhraseType,
];

/// Part-of-speech tagger output layers.
pub const POS_LAYER_TYPES: [LayerType; 4] = [
    LayerType::Bnc,
    LayerType::Penn,
    LayerType::Scpos,
    LayerType::Hepple,
];

impl LayerType {
    pub fn code(self) -> i64 {
        match self {
            Self::FrameElement => 1,
            Self::Target => 2,
            Self::GrammaticalFunction => 3,
            Self::PhraseType => 4,
            Self::Bnc => 10,
            Self::Penn => 12,
            Self::Scpos => 15,
            Self::Hepple => 22,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::FrameElement => "FE",
            Self::Target => "Target",
            Self::GrammaticalFunction => "GF",
            Self::PhraseType => "PT",
            Self::Bnc => "BNC",
            Self::Penn => "PENN",
            Self::Scpos => "SCPOS",
            Self::Hepple => "HEPPLE",
        }
    }
}

impl TryFrom<i64> for LayerType {
    type Error = IntegrityError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Self::FrameElement),
            2 => Ok(Self::Target),
            3 => Ok(Self::GrammaticalFunction),
            4 => Ok(Self::PhraseType),
            10 => Ok(Self::Bnc),
            12 => Ok(Self::Penn),
            15 => Ok(Self::Scpos),
            22 => Ok(Self::Hepple),
            _ => Err(IntegrityError::UnknownCode {
                table: "layer type",
                code,
            }),
        }
    }
}

/// How a frame element is realized in a manually annotated sentence.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum InstantiationType {
    Normal,
    APos,
    Cni,
    Dni,
    Ini,
    Inc,
}

impl InstantiationType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::APos => "APos",
            Self::Cni => "CNI",
            Self::Dni => "DNI",
            Self::Ini => "INI",
            Self::Inc => "INC",
        }
    }
}

impl TryFrom<i64> for InstantiationType {
    type Error = IntegrityError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Self::Normal),
            2 => Ok(Self::APos),
            3 => Ok(Self::Cni),
            4 => Ok(Self::Dni),
            5 => Ok(Self::Ini),
            6 => Ok(Self::Inc),
            _ => Err(IntegrityError::UnknownCode {
                table: "instantiation type",
                code,
            }),
        }
    }
}
