//! Canvas domain model — the nine fixed Business Model Canvas blocks and the
//! inputs a submission carries through the pipeline.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub mod extractor;
pub mod handlers;
pub mod prompts;

/// Business category selected on the form. Drives metaprompt selection.
/// Unrecognized values deserialize to `Autre` — the generic fallback is
/// product behavior, never an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BusinessCategory {
    #[serde(rename = "PME")]
    Pme,
    Startup,
    #[default]
    #[serde(other)]
    Autre,
}

/// Business identity submitted with a generation request.
/// Immutable once submitted; each submission is an independent run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessProfile {
    pub name: String,
    pub category: BusinessCategory,
    pub date: NaiveDate,
}

impl BusinessProfile {
    /// Document title, e.g. "Business Model Canvas de Acme".
    pub fn document_title(&self) -> String {
        format!("Business Model Canvas de {}", self.name)
    }

    /// Suggested download file name: spaces replaced, fixed extension.
    /// Quotes and control characters are dropped — the name is interpolated
    /// into a quoted Content-Disposition header value.
    pub fn document_filename(&self) -> String {
        let name: String = self
            .name
            .chars()
            .map(|c| if c == ' ' { '_' } else { c })
            .filter(|c| *c != '"' && !c.is_control())
            .collect();
        format!("BMC_{name}.docx")
    }

    /// Date stamp rendered in the document, e.g. "05 March 2026".
    pub fn date_stamp(&self) -> String {
        self.date.format("%d %B %Y").to_string()
    }
}

/// The nine canvas sections, fixed and exhaustive.
///
/// Ordering matters: `ALL` is the order blocks are requested from the
/// generator and laid out in the document (first five across the top,
/// resources/channels beneath, costs and revenue along the bottom).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CanvasBlock {
    KeyPartners,
    KeyActivities,
    ValueProposition,
    CustomerRelationships,
    CustomerSegments,
    KeyResources,
    Channels,
    CostStructure,
    RevenueStreams,
}

impl CanvasBlock {
    pub const ALL: [CanvasBlock; 9] = [
        CanvasBlock::KeyPartners,
        CanvasBlock::KeyActivities,
        CanvasBlock::ValueProposition,
        CanvasBlock::CustomerRelationships,
        CanvasBlock::CustomerSegments,
        CanvasBlock::KeyResources,
        CanvasBlock::Channels,
        CanvasBlock::CostStructure,
        CanvasBlock::RevenueStreams,
    ];

    /// The five blocks shown across the top row of the canvas grid.
    pub const TOP_ROW: [CanvasBlock; 5] = [
        CanvasBlock::KeyPartners,
        CanvasBlock::KeyActivities,
        CanvasBlock::ValueProposition,
        CanvasBlock::CustomerRelationships,
        CanvasBlock::CustomerSegments,
    ];

    /// French label used both as the expected heading in generated markup
    /// and as the block title in the document.
    pub fn label(self) -> &'static str {
        match self {
            CanvasBlock::KeyPartners => "Partenaires clés",
            CanvasBlock::KeyActivities => "Activités clés",
            CanvasBlock::ValueProposition => "Offre (proposition de valeur)",
            CanvasBlock::CustomerRelationships => "Relation client",
            CanvasBlock::CustomerSegments => "Segments de clientèle",
            CanvasBlock::KeyResources => "Ressources clés",
            CanvasBlock::Channels => "Canaux de distribution",
            CanvasBlock::CostStructure => "Structure des coûts",
            CanvasBlock::RevenueStreams => "Sources de revenus",
        }
    }
}

/// Optional free-text hints supplied on the form, one per block.
/// Empty string means "let the generator invent content".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SupplementaryFields {
    pub partenaires_cles: String,
    pub activites_cles: String,
    pub offre_valeur: String,
    pub relation_client: String,
    pub segments_clientele: String,
    pub ressources_cles: String,
    pub canaux_distribution: String,
    pub structure_couts: String,
    pub sources_revenus: String,
}

impl SupplementaryFields {
    pub fn get(&self, block: CanvasBlock) -> &str {
        match block {
            CanvasBlock::KeyPartners => &self.partenaires_cles,
            CanvasBlock::KeyActivities => &self.activites_cles,
            CanvasBlock::ValueProposition => &self.offre_valeur,
            CanvasBlock::CustomerRelationships => &self.relation_client,
            CanvasBlock::CustomerSegments => &self.segments_clientele,
            CanvasBlock::KeyResources => &self.ressources_cles,
            CanvasBlock::Channels => &self.canaux_distribution,
            CanvasBlock::CostStructure => &self.structure_couts,
            CanvasBlock::RevenueStreams => &self.sources_revenus,
        }
    }
}

/// Extracted block contents, derived from generated markup each run.
/// Every one of the nine blocks is present; a block the generator omitted
/// maps to the empty string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CanvasBlocks(BTreeMap<CanvasBlock, String>);

impl CanvasBlocks {
    pub fn insert(&mut self, block: CanvasBlock, content: String) {
        self.0.insert(block, content);
    }

    pub fn get(&self, block: CanvasBlock) -> &str {
        self.0.get(&block).map(String::as_str).unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_category_falls_back_to_autre() {
        let cat: BusinessCategory = serde_json::from_str(r#""Grande Entreprise""#).unwrap();
        assert_eq!(cat, BusinessCategory::Autre);
    }

    #[test]
    fn test_known_categories_deserialize() {
        let pme: BusinessCategory = serde_json::from_str(r#""PME""#).unwrap();
        let startup: BusinessCategory = serde_json::from_str(r#""Startup""#).unwrap();
        assert_eq!(pme, BusinessCategory::Pme);
        assert_eq!(startup, BusinessCategory::Startup);
    }

    #[test]
    fn test_block_labels_are_nine_and_distinct() {
        let labels: std::collections::HashSet<_> =
            CanvasBlock::ALL.iter().map(|b| b.label()).collect();
        assert_eq!(labels.len(), 9);
    }

    #[test]
    fn test_document_filename_replaces_spaces() {
        let profile = BusinessProfile {
            name: "COIFFURE MOBILE S.a.r.l".to_string(),
            category: BusinessCategory::Pme,
            date: NaiveDate::from_ymd_opt(2026, 3, 5).unwrap(),
        };
        assert_eq!(
            profile.document_filename(),
            "BMC_COIFFURE_MOBILE_S.a.r.l.docx"
        );
    }

    #[test]
    fn test_document_filename_drops_quotes_and_control_characters() {
        let profile = BusinessProfile {
            name: "Acme \"Le Canvas\"\t\n".to_string(),
            category: BusinessCategory::Startup,
            date: NaiveDate::from_ymd_opt(2026, 3, 5).unwrap(),
        };
        let filename = profile.document_filename();
        assert_eq!(filename, "BMC_Acme_Le_Canvas.docx");
        // The quoted header value built from it must be accepted.
        let header = format!("attachment; filename=\"{filename}\"");
        assert!(axum::http::HeaderValue::try_from(header).is_ok());
    }

    #[test]
    fn test_canvas_blocks_missing_block_is_empty() {
        let blocks = CanvasBlocks::default();
        assert_eq!(blocks.get(CanvasBlock::KeyPartners), "");
    }

    #[test]
    fn test_supplementary_fields_default_all_empty() {
        let fields = SupplementaryFields::default();
        for block in CanvasBlock::ALL {
            assert_eq!(fields.get(block), "");
        }
    }

    #[test]
    fn test_supplementary_fields_partial_json() {
        let fields: SupplementaryFields =
            serde_json::from_str(r#"{"partenaires_cles": "Fournisseurs locaux"}"#).unwrap();
        assert_eq!(fields.get(CanvasBlock::KeyPartners), "Fournisseurs locaux");
        assert_eq!(fields.get(CanvasBlock::RevenueStreams), "");
    }
}
