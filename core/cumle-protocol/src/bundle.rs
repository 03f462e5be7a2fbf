//! Binary exercise bundles.
//!
//! A bundle carries the same list of sentences as the JSON format, archived
//! with rkyv so a front-end can ship it as a compact asset.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use rkyv::{Archive, Deserialize, Serialize};

use crate::model::{Analysis, SentenceItem};
use crate::roles::Role;

pub const BUNDLE_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[archive(check_bytes)]
pub struct BundledSentence {
    pub text: String,
    pub analysis: Vec<(Role, Vec<String>)>,
}

#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[archive(check_bytes)]
pub struct Bundle {
    pub version: u32,
    pub sentences: Vec<BundledSentence>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BundleError {
    Serialize(String),
    Corrupt(String),
    UnsupportedVersion(u32),
}

impl fmt::Display for BundleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BundleError::Serialize(msg) => write!(f, "could not archive bundle: {}", msg),
            BundleError::Corrupt(msg) => write!(f, "bundle failed validation: {}", msg),
            BundleError::UnsupportedVersion(v) => write!(f, "unsupported bundle version {}", v),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BundleError {}

impl From<&SentenceItem> for BundledSentence {
    fn from(item: &SentenceItem) -> Self {
        Self {
            text: item.text.clone(),
            analysis: item
                .analysis
                .iter()
                .map(|(role, words)| (*role, words.clone()))
                .collect(),
        }
    }
}

impl From<BundledSentence> for SentenceItem {
    fn from(bundled: BundledSentence) -> Self {
        let analysis: Analysis = bundled.analysis.into_iter().collect();
        SentenceItem { text: bundled.text, analysis }
    }
}

impl Bundle {
    pub fn from_items(items: &[SentenceItem]) -> Self {
        Self {
            version: BUNDLE_VERSION,
            sentences: items.iter().map(BundledSentence::from).collect(),
        }
    }

    pub fn into_items(self) -> Vec<SentenceItem> {
        self.sentences.into_iter().map(SentenceItem::from).collect()
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, BundleError> {
        rkyv::to_bytes::<_, 1024>(self)
            .map(|bytes| bytes.to_vec())
            .map_err(|e| BundleError::Serialize(alloc::format!("{:?}", e)))
    }

    /// Validates the archive before deserializing it. The input is copied into
    /// an aligned buffer first, so bytes read straight from a file are fine.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, BundleError> {
        let mut aligned = rkyv::AlignedVec::with_capacity(bytes.len());
        aligned.extend_from_slice(bytes);
        let bundle = rkyv::from_bytes::<Bundle>(&aligned)
            .map_err(|e| BundleError::Corrupt(alloc::format!("{:?}", e)))?;
        if bundle.version != BUNDLE_VERSION {
            return Err(BundleError::UnsupportedVersion(bundle.version));
        }
        Ok(bundle)
    }
}
