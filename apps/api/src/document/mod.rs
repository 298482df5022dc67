//! Document Assembler — renders the nine extracted blocks into a .docx laid
//! out as a Business Model Canvas grid.
//!
//! Layout (5-column bordered table):
//!   row 0: document title merged across all columns
//!   row 1: company name (3 columns) and date (2 columns)
//!   row 2: bold centered headers for the five top blocks
//!   rows 3-4: top-block content, with partners / value proposition /
//!             segments merged vertically and resources / channels slotted
//!             beneath activities and customer relationships
//!   row 5: cost structure (3 columns) and revenue sources (2 columns)
//!
//! Deterministic given its inputs; serialization failure is fatal to the
//! request — no partial document is ever emitted.

use std::io::Cursor;

use docx_rs::{
    AbstractNumbering, AlignmentType, Docx, IndentLevel, Level, LevelJc, LevelText, NumberFormat,
    Numbering, NumberingId, Paragraph, Run, RunFonts, Start, Table, TableCell, TableRow,
    VMergeType,
};

use crate::canvas::{BusinessProfile, CanvasBlock, CanvasBlocks};
use crate::errors::AppError;

/// Content type of the produced artifact.
pub const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Numbering definition id for bullet paragraphs inside canvas cells.
const BULLET_NUMBERING: usize = 1;

/// Column width in twips (~1.8").
const COLUMN_WIDTH: usize = 2592;

/// Builds the canvas document and serializes it to a byte stream.
pub fn assemble(profile: &BusinessProfile, blocks: &CanvasBlocks) -> Result<Vec<u8>, AppError> {
    let title = profile.document_title();
    let date_stamp = profile.date_stamp();

    let table = Table::new(vec![
        // Title row, merged across the full grid.
        TableRow::new(vec![TableCell::new().grid_span(5).add_paragraph(
            Paragraph::new()
                .add_run(Run::new().add_text(title.as_str()).bold().size(28))
                .align(AlignmentType::Center),
        )]),
        // Metadata row: company name left, date right.
        TableRow::new(vec![
            TableCell::new().grid_span(3).add_paragraph(
                Paragraph::new()
                    .add_run(
                        Run::new()
                            .add_text(format!("Nom de l'entreprise : {}", profile.name))
                            .bold(),
                    )
                    .align(AlignmentType::Left),
            ),
            TableCell::new().grid_span(2).add_paragraph(
                Paragraph::new()
                    .add_run(Run::new().add_text(format!("Date : {date_stamp}")).bold())
                    .align(AlignmentType::Right),
            ),
        ]),
        // Header row for the five top blocks.
        TableRow::new(
            CanvasBlock::TOP_ROW
                .iter()
                .map(|block| header_cell(block.label()))
                .collect(),
        ),
        // Top content row. Columns 0, 2 and 4 span down into the next row.
        TableRow::new(vec![
            block_cell(CanvasBlock::KeyPartners, blocks)
                .vertical_merge(VMergeType::Restart),
            block_cell(CanvasBlock::KeyActivities, blocks),
            block_cell(CanvasBlock::ValueProposition, blocks)
                .vertical_merge(VMergeType::Restart),
            block_cell(CanvasBlock::CustomerRelationships, blocks),
            block_cell(CanvasBlock::CustomerSegments, blocks)
                .vertical_merge(VMergeType::Restart),
        ]),
        // Resources and channels sit beneath activities and relationships.
        TableRow::new(vec![
            merged_continuation(),
            block_cell(CanvasBlock::KeyResources, blocks),
            merged_continuation(),
            block_cell(CanvasBlock::Channels, blocks),
            merged_continuation(),
        ]),
        // Bottom row: costs across three columns, revenue across two.
        TableRow::new(vec![
            block_cell(CanvasBlock::CostStructure, blocks).grid_span(3),
            block_cell(CanvasBlock::RevenueStreams, blocks).grid_span(2),
        ]),
    ])
    .set_grid(vec![COLUMN_WIDTH; 5]);

    let docx = Docx::new()
        .default_fonts(RunFonts::new().ascii("Calibri"))
        .default_size(22) // half-points: 11pt
        .add_paragraph(
            Paragraph::new()
                .add_run(Run::new().add_text(title.as_str()).bold().size(28))
                .align(AlignmentType::Center),
        )
        .add_paragraph(
            Paragraph::new()
                .add_run(Run::new().add_text(format!("Date : {date_stamp}")).bold())
                .align(AlignmentType::Right),
        )
        .add_paragraph(Paragraph::new())
        .add_table(table)
        .add_abstract_numbering(AbstractNumbering::new(BULLET_NUMBERING).add_level(Level::new(
            0,
            Start::new(1),
            NumberFormat::new("bullet"),
            LevelText::new("•"),
            LevelJc::new("left"),
        )))
        .add_numbering(Numbering::new(BULLET_NUMBERING, BULLET_NUMBERING));

    let mut buffer = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buffer)
        .map_err(|e| AppError::Document(format!("docx serialization failed: {e}")))?;

    Ok(buffer.into_inner())
}

/// Bold, centered header cell.
fn header_cell(label: &str) -> TableCell {
    TableCell::new().add_paragraph(
        Paragraph::new()
            .add_run(Run::new().add_text(label).bold())
            .align(AlignmentType::Center),
    )
}

/// Content cell: bold block title, then one paragraph per extracted line.
/// Dash-prefixed lines become real bullet items; everything else renders as
/// a plain paragraph. An empty block still gets its title.
fn block_cell(block: CanvasBlock, blocks: &CanvasBlocks) -> TableCell {
    let mut cell = TableCell::new()
        .add_paragraph(Paragraph::new().add_run(Run::new().add_text(block.label()).bold()));

    for line in blocks.get(block).lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let paragraph = match bullet_item(line) {
            Some(item) => Paragraph::new()
                .add_run(Run::new().add_text(item))
                .numbering(NumberingId::new(BULLET_NUMBERING), IndentLevel::new(0)),
            None => Paragraph::new().add_run(Run::new().add_text(line)),
        };
        cell = cell.add_paragraph(paragraph);
    }

    cell
}

/// Placeholder cell continuing a vertical merge started in the row above.
fn merged_continuation() -> TableCell {
    TableCell::new()
        .add_paragraph(Paragraph::new())
        .vertical_merge(VMergeType::Continue)
}

/// Strips a list marker (`- `, `+ `, `• `) and returns the item text, or
/// `None` when the line is a plain paragraph.
fn bullet_item(line: &str) -> Option<&str> {
    let rest = line
        .strip_prefix('-')
        .or_else(|| line.strip_prefix('+'))
        .or_else(|| line.strip_prefix('•'))?;
    rest.starts_with(char::is_whitespace)
        .then(|| rest.trim_start())
}
