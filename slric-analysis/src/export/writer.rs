//! Delimited row export for result graphs.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use slric_core::config::ExportConfig;
use slric_core::errors::ExportError;
use slric_core::InfluenceGraph;

const EDGE_HEADERS: [&str; 4] = ["From", "To", "Edge Type", "Value"];
const NODE_HEADERS: [&str; 3] = ["Node", "Centrality", "Value"];

/// Attribute name written in the "Edge Type" column.
const EDGE_TYPE: &str = "weight";

/// Writes node score rows or edge rows to a delimited text file.
#[derive(Debug, Clone)]
pub struct RowWriter {
    separator: String,
    batch_size: usize,
    append: bool,
    extra_headers: Vec<String>,
    extra_values: Vec<String>,
}

impl RowWriter {
    pub fn new(config: &ExportConfig) -> Self {
        Self {
            separator: config.effective_separator().to_string(),
            batch_size: config.effective_batch_size().max(1),
            append: config.effective_append(),
            extra_headers: Vec::new(),
            extra_values: Vec::new(),
        }
    }

    /// Leading columns prepended to every row, with their header names.
    pub fn with_extra_columns(mut self, headers: Vec<String>, values: Vec<String>) -> Self {
        self.extra_headers = headers;
        self.extra_values = values;
        self
    }

    /// One `Node;Centrality;Value` row per node score. Returns the number of rows.
    pub fn write_centrality(&self, graph: &InfluenceGraph, path: &Path) -> Result<usize, ExportError> {
        let rows = graph.node_indices().flat_map(|idx| {
            let node = graph.node(idx);
            node.scores
                .iter()
                .map(move |(name, value)| vec![node.name.clone(), name.clone(), value.to_string()])
        });
        self.write_rows(&NODE_HEADERS, rows, path)
    }

    /// One `From;To;Edge Type;Value` row per edge. Returns the number of rows.
    pub fn write_edges(&self, graph: &InfluenceGraph, path: &Path) -> Result<usize, ExportError> {
        let rows = graph.edges().map(|(from, to, weight)| {
            vec![
                graph.name(from).to_string(),
                graph.name(to).to_string(),
                EDGE_TYPE.to_string(),
                weight.to_string(),
            ]
        });
        self.write_rows(&EDGE_HEADERS, rows, path)
    }

    fn write_rows<I>(&self, headers: &[&str], rows: I, path: &Path) -> Result<usize, ExportError>
    where
        I: Iterator<Item = Vec<String>>,
    {
        let io_err = |e: std::io::Error| ExportError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        };

        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .append(self.append)
            .truncate(!self.append)
            .open(path)
            .map_err(io_err)?;

        let header: Vec<&str> = self
            .extra_headers
            .iter()
            .map(String::as_str)
            .chain(headers.iter().copied())
            .collect();
        let mut buffer = header.join(&self.separator);
        buffer.push('\n');

        let mut pending = 0;
        let mut written = 0;
        for row in rows {
            let line: Vec<&str> = self
                .extra_values
                .iter()
                .map(String::as_str)
                .chain(row.iter().map(String::as_str))
                .collect();
            buffer.push_str(&line.join(&self.separator));
            buffer.push('\n');
            pending += 1;
            written += 1;

            if pending >= self.batch_size {
                file.write_all(buffer.as_bytes()).map_err(io_err)?;
                buffer.clear();
                pending = 0;
            }
        }
        if !buffer.is_empty() {
            file.write_all(buffer.as_bytes()).map_err(io_err)?;
        }
        file.flush().map_err(io_err)?;

        tracing::debug!(path = %path.display(), rows = written, "rows exported");
        Ok(written)
    }
}
