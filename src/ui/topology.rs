//! Text model and drawing for the disk topology screen.
//!
//! Stored disks and partitions are never altered; uppercasing and the
//! placeholders for missing partition fields happen here only.

use crate::state::{FetchPhase, PartitionVisibility, TopologyViewer};
use crate::types::{Disk, Partition};
use crate::ui::render::clamp_scroll;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub const TOPOLOGY_KEY_HINTS: &str =
    "espacio mostrar/ocultar particiones  ↑/↓ pgup/pgdn desplazar  tab/f1 consola  ctrl+c salir";
pub const NO_PARTITIONS_MESSAGE: &str = "No hay particiones creadas en este disco";
pub const UNKNOWN_NAME: &str = "Desconocida";
pub const UNKNOWN_SIZE: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopologyLine {
    Section(String),
    Title(String),
    Detail(String),
    Notice(String),
    Error(String),
    Blank,
}

impl TopologyLine {
    pub fn text(&self) -> &str {
        match self {
            TopologyLine::Section(text)
            | TopologyLine::Title(text)
            | TopologyLine::Detail(text)
            | TopologyLine::Notice(text)
            | TopologyLine::Error(text) => text,
            TopologyLine::Blank => "",
        }
    }

    fn to_line(&self) -> Line<'static> {
        let style = match self {
            TopologyLine::Section(_) => Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            TopologyLine::Title(_) => Style::default().add_modifier(Modifier::BOLD),
            TopologyLine::Detail(_) | TopologyLine::Blank => Style::default(),
            TopologyLine::Notice(_) => Style::default().fg(Color::DarkGray),
            TopologyLine::Error(_) => Style::default().fg(Color::Red),
        };
        Line::styled(self.text().to_string(), style)
    }
}

pub fn partitions_header(visibility: PartitionVisibility) -> String {
    let arrow = if visibility.is_visible() { '▲' } else { '▼' };
    format!("Sistema de Particiones {arrow}")
}

/// Card for the disk at zero-based `index`.
pub fn disk_card(index: usize, disk: &Disk) -> Vec<TopologyLine> {
    let mut lines = vec![
        TopologyLine::Title(format!("Disco {}", index + 1)),
        TopologyLine::Detail(format!(
            "  Tamaño: {} {}",
            disk.size,
            disk.unit.to_uppercase()
        )),
        TopologyLine::Detail(format!("  Fit: {}", disk.fit.to_uppercase())),
    ];
    if let Some(path) = disk.path.as_deref().filter(|path| !path.is_empty()) {
        lines.push(TopologyLine::Detail(format!("  Ruta: {path}")));
    }
    lines
}

/// Partition section for the disk at zero-based `index`.
pub fn partition_block(index: usize, disk: &Disk) -> Vec<TopologyLine> {
    let mut lines = vec![TopologyLine::Title(format!(
        "Particiones del Disco {}",
        index + 1
    ))];
    match disk.listed_partitions() {
        Some(partitions) => {
            for (p_index, partition) in partitions.iter().enumerate() {
                lines.extend(partition_lines(p_index, partition));
            }
        }
        None => lines.push(TopologyLine::Notice(format!("  {NO_PARTITIONS_MESSAGE}"))),
    }
    lines
}

fn partition_lines(index: usize, partition: &Partition) -> Vec<TopologyLine> {
    let name = present(&partition.name).unwrap_or(UNKNOWN_NAME);
    let size = partition
        .size
        .filter(|size| *size != 0)
        .map(|size| size.to_string())
        .unwrap_or_else(|| UNKNOWN_SIZE.to_string());
    let unit = present(&partition.unit)
        .map(str::to_uppercase)
        .unwrap_or_default();
    let kind = present(&partition.kind)
        .map(str::to_uppercase)
        .unwrap_or_default();

    let mut lines = vec![
        TopologyLine::Title(format!("  Partición {}", index + 1)),
        TopologyLine::Detail(format!("    Nombre: {name}")),
        TopologyLine::Detail(format!("    Tamaño: {size} {unit}").trim_end().to_string()),
        TopologyLine::Detail(format!("    Tipo: {kind}").trim_end().to_string()),
    ];
    if let Some(fit) = present(&partition.fit) {
        lines.push(TopologyLine::Detail(format!(
            "    Fit: {}",
            fit.to_uppercase()
        )));
    }
    lines
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|value| !value.is_empty())
}

/// Everything the topology screen shows, top to bottom.
pub fn topology_lines(viewer: &TopologyViewer) -> Vec<TopologyLine> {
    let mut lines = vec![TopologyLine::Section("Sistema de Discos".to_string())];
    match viewer.phase() {
        FetchPhase::Idle | FetchPhase::Loading => {
            lines.push(TopologyLine::Notice("Cargando discos...".to_string()));
        }
        FetchPhase::Failed | FetchPhase::Loaded => {
            if let Some(error) = viewer.error_message() {
                lines.push(TopologyLine::Error(error.to_string()));
            }
        }
    }
    for (index, disk) in viewer.disks().iter().enumerate() {
        lines.extend(disk_card(index, disk));
    }

    lines.push(TopologyLine::Blank);
    lines.push(TopologyLine::Section(partitions_header(viewer.partitions())));
    if viewer.partitions().is_visible() {
        for (index, disk) in viewer.disks().iter().enumerate() {
            lines.extend(partition_block(index, disk));
        }
    }
    lines
}

pub fn render_topology(frame: &mut Frame<'_>, body: Rect, viewer: &TopologyViewer) {
    let block = Block::default().borders(Borders::ALL).title("Discos");
    let inner = block.inner(body);
    frame.render_widget(block, body);
    if inner.height == 0 || inner.width == 0 {
        return;
    }

    let lines = topology_lines(viewer);
    let scroll = clamp_scroll(viewer.scroll(), lines.len(), inner.height as usize);
    let rendered: Vec<Line> = lines
        .iter()
        .skip(scroll)
        .take(inner.height as usize)
        .map(TopologyLine::to_line)
        .collect();
    frame.render_widget(Paragraph::new(rendered), inner);
}
