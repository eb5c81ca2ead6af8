//! Declarative chart descriptions rendered into Plotly figure JSON.
//!
//! A [`ChartSpec`] names columns of the row records (x/y, color, facet, path,
//! values, hover fields); [`render`] wires those columns into traces and a
//! layout. The browser side only has to call `Plotly.newPlot(data, layout)`.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::collections::{BTreeMap, HashMap};

use crate::error::{EngineError, Result};
use crate::rows::{cell_label, Record};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Line,
    Pie,
    Treemap,
    Sunburst,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BarMode {
    Group,
    Stack,
    Relative,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HoverField {
    pub column: String,
    /// d3-format spec appended to the placeholder, e.g. `,d`.
    pub format: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    pub x: Option<String>,
    pub y: Vec<String>,
    pub color: Option<String>,
    pub facet_col: Option<String>,
    pub barmode: Option<BarMode>,
    pub path: Vec<String>,
    pub values: Option<String>,
    pub names: Option<String>,
    pub text: Option<String>,
    pub text_template: Option<String>,
    pub text_position: Option<String>,
    pub hover: Vec<HoverField>,
    /// Display names for columns (axis titles, legend title).
    pub labels: BTreeMap<String, String>,
    pub hole: Option<f64>,
    pub markers: bool,
    pub uniform_text_min_size: Option<u32>,
}

impl ChartSpec {
    pub fn new(kind: ChartKind, title: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            x: None,
            y: Vec::new(),
            color: None,
            facet_col: None,
            barmode: None,
            path: Vec::new(),
            values: None,
            names: None,
            text: None,
            text_template: None,
            text_position: None,
            hover: Vec::new(),
            labels: BTreeMap::new(),
            hole: None,
            markers: false,
            uniform_text_min_size: None,
        }
    }

    pub fn bar(title: impl Into<String>) -> Self {
        Self::new(ChartKind::Bar, title)
    }

    pub fn line(title: impl Into<String>) -> Self {
        Self::new(ChartKind::Line, title)
    }

    pub fn pie(title: impl Into<String>) -> Self {
        Self::new(ChartKind::Pie, title)
    }

    pub fn treemap(title: impl Into<String>) -> Self {
        Self::new(ChartKind::Treemap, title)
    }

    pub fn sunburst(title: impl Into<String>) -> Self {
        Self::new(ChartKind::Sunburst, title)
    }

    pub fn x(mut self, column: &str) -> Self {
        self.x = Some(column.to_string());
        self
    }

    pub fn y(mut self, columns: &[&str]) -> Self {
        self.y = columns.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn color(mut self, column: &str) -> Self {
        self.color = Some(column.to_string());
        self
    }

    pub fn facet_col(mut self, column: &str) -> Self {
        self.facet_col = Some(column.to_string());
        self
    }

    pub fn barmode(mut self, mode: BarMode) -> Self {
        self.barmode = Some(mode);
        self
    }

    pub fn path(mut self, columns: &[&str]) -> Self {
        self.path = columns.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn values(mut self, column: &str) -> Self {
        self.values = Some(column.to_string());
        self
    }

    pub fn names(mut self, column: &str) -> Self {
        self.names = Some(column.to_string());
        self
    }

    pub fn text(mut self, column: &str) -> Self {
        self.text = Some(column.to_string());
        self
    }

    pub fn text_template(mut self, template: &str) -> Self {
        self.text_template = Some(template.to_string());
        self
    }

    pub fn text_position(mut self, position: &str) -> Self {
        self.text_position = Some(position.to_string());
        self
    }

    pub fn hover(mut self, columns: &[&str]) -> Self {
        self.hover.extend(columns.iter().map(|c| HoverField {
            column: c.to_string(),
            format: None,
        }));
        self
    }

    pub fn hover_formatted(mut self, column: &str, format: &str) -> Self {
        self.hover.push(HoverField {
            column: column.to_string(),
            format: Some(format.to_string()),
        });
        self
    }

    pub fn label(mut self, column: &str, label: &str) -> Self {
        self.labels.insert(column.to_string(), label.to_string());
        self
    }

    pub fn hole(mut self, hole: f64) -> Self {
        self.hole = Some(hole);
        self
    }

    pub fn markers(mut self) -> Self {
        self.markers = true;
        self
    }

    pub fn uniform_text(mut self, min_size: u32) -> Self {
        self.uniform_text_min_size = Some(min_size);
        self
    }

    fn label_for<'a>(&'a self, column: &'a str) -> &'a str {
        self.labels.get(column).map(String::as_str).unwrap_or(column)
    }

    fn missing(&self, column: &str) -> EngineError {
        EngineError::MissingColumn {
            chart: self.title.clone(),
            column: column.to_string(),
        }
    }

    fn cell<'r>(&self, record: &'r Record, column: &str) -> Result<&'r Value> {
        record.get(column).ok_or_else(|| self.missing(column))
    }

    fn required<'a>(&self, column: &'a Option<String>, role: &'a str) -> Result<&'a str> {
        column.as_deref().ok_or_else(|| self.missing(role))
    }
}

/// A Plotly figure: `data` traces plus `layout`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    pub data: Vec<Value>,
    pub layout: Value,
}

pub fn render(spec: &ChartSpec, records: &[Record]) -> Result<Figure> {
    match spec.kind {
        ChartKind::Bar | ChartKind::Line => render_cartesian(spec, records),
        ChartKind::Pie => render_pie(spec, records),
        ChartKind::Treemap | ChartKind::Sunburst => render_hierarchy(spec, records),
    }
}

/// Distinct labels of `column` in first-seen order.
fn distinct(spec: &ChartSpec, records: &[Record], column: &str) -> Result<Vec<String>> {
    let mut seen = Vec::new();
    for record in records {
        let label = cell_label(spec.cell(record, column)?);
        if !seen.contains(&label) {
            seen.push(label);
        }
    }
    Ok(seen)
}

fn base_layout(spec: &ChartSpec) -> Map<String, Value> {
    let mut layout = Map::new();
    layout.insert("title".into(), json!({ "text": spec.title }));
    if let Some(min_size) = spec.uniform_text_min_size {
        layout.insert("uniformtext".into(), json!({ "minsize": min_size, "mode": "hide" }));
    }
    layout
}

fn hover_suffix(spec: &ChartSpec) -> String {
    spec.hover
        .iter()
        .enumerate()
        .map(|(i, field)| match &field.format {
            Some(fmt) => format!("<br>{}=%{{customdata[{}]:{}}}", spec.label_for(&field.column), i, fmt),
            None => format!("<br>{}=%{{customdata[{}]}}", spec.label_for(&field.column), i),
        })
        .collect()
}

fn customdata(spec: &ChartSpec, records: &[&Record]) -> Result<Option<Value>> {
    if spec.hover.is_empty() {
        return Ok(None);
    }
    let rows = records
        .iter()
        .map(|record| {
            spec.hover
                .iter()
                .map(|field| spec.cell(record, &field.column).cloned())
                .collect::<Result<Vec<Value>>>()
                .map(Value::Array)
        })
        .collect::<Result<Vec<Value>>>()?;
    Ok(Some(Value::Array(rows)))
}

fn apply_text(spec: &ChartSpec, trace: &mut Map<String, Value>, records: &[&Record]) -> Result<()> {
    if let Some(column) = &spec.text {
        let text = records
            .iter()
            .map(|r| spec.cell(r, column).cloned())
            .collect::<Result<Vec<Value>>>()?;
        trace.insert("text".into(), Value::Array(text));
    }
    if let Some(template) = &spec.text_template {
        trace.insert("texttemplate".into(), json!(template));
    }
    if let Some(position) = &spec.text_position {
        trace.insert("textposition".into(), json!(position));
    }
    Ok(())
}

// Plotly names the first axis pair `x`/`y` and the rest `x2`, `y2`, ...
fn axis_id(prefix: &str, index: usize) -> String {
    if index == 0 {
        prefix.to_string()
    } else {
        format!("{}{}", prefix, index + 1)
    }
}

fn axis_key(prefix: &str, index: usize) -> String {
    if index == 0 {
        format!("{}axis", prefix)
    } else {
        format!("{}axis{}", prefix, index + 1)
    }
}

const FACET_GAP: f64 = 0.03;

fn render_cartesian(spec: &ChartSpec, records: &[Record]) -> Result<Figure> {
    let x_col = spec.required(&spec.x, "x")?;
    if spec.y.is_empty() {
        return Err(spec.missing("y"));
    }

    let facets: Vec<Option<String>> = match &spec.facet_col {
        Some(col) => distinct(spec, records, col)?.into_iter().map(Some).collect(),
        None => vec![None],
    };
    // Long form: one y column split by color. Wide form: one trace per y column.
    let long_form = spec.y.len() == 1;
    let series: Vec<String> = match (&spec.color, long_form) {
        (Some(color), true) => distinct(spec, records, color)?,
        _ => spec.y.clone(),
    };

    let mut data = Vec::new();
    for (facet_idx, facet) in facets.iter().enumerate() {
        let in_facet: Vec<&Record> = records
            .iter()
            .filter(|r| match (facet, &spec.facet_col) {
                (Some(value), Some(col)) => r.get(col).map(cell_label).as_deref() == Some(value.as_str()),
                _ => true,
            })
            .collect();

        for name in &series {
            let (rows, y_col): (Vec<&Record>, &str) = match (&spec.color, long_form) {
                (Some(color), true) => (
                    in_facet
                        .iter()
                        .copied()
                        .filter(|r| r.get(color).map(cell_label).as_deref() == Some(name.as_str()))
                        .collect(),
                    spec.y[0].as_str(),
                ),
                _ => (in_facet.clone(), name.as_str()),
            };
            if rows.is_empty() {
                continue;
            }
            data.push(cartesian_trace(spec, name, &rows, x_col, y_col, facet_idx)?);
        }
    }

    let mut layout = base_layout(spec);
    if spec.kind == ChartKind::Bar {
        if let Some(mode) = spec.barmode {
            layout.insert("barmode".into(), json!(mode));
        }
    }
    let legend_title = match (&spec.color, long_form) {
        (Some(color), true) => spec.label_for(color).to_string(),
        _ => spec.label_for("variable").to_string(),
    };
    layout.insert("legend".into(), json!({ "title": { "text": legend_title } }));

    let y_title = if long_form {
        spec.label_for(&spec.y[0])
    } else {
        spec.label_for("value")
    };
    let width = 1.0 / facets.len() as f64;
    let mut annotations = Vec::new();
    for (i, facet) in facets.iter().enumerate() {
        let start = i as f64 * width;
        let end = if i + 1 == facets.len() {
            1.0
        } else {
            (i + 1) as f64 * width - FACET_GAP
        };
        layout.insert(
            axis_key("x", i),
            json!({
                "anchor": axis_id("y", i),
                "domain": [start, end],
                "title": { "text": spec.label_for(x_col) },
            }),
        );
        let mut y_axis = json!({ "anchor": axis_id("x", i) });
        if i == 0 {
            y_axis["title"] = json!({ "text": y_title });
        } else {
            y_axis["matches"] = json!("y");
            y_axis["showticklabels"] = json!(false);
        }
        layout.insert(axis_key("y", i), y_axis);

        if let (Some(value), Some(col)) = (facet, &spec.facet_col) {
            annotations.push(json!({
                "text": format!("{}={}", spec.label_for(col), value),
                "x": (start + end) / 2.0,
                "xref": "paper",
                "xanchor": "center",
                "y": 1.0,
                "yref": "paper",
                "yanchor": "bottom",
                "showarrow": false,
            }));
        }
    }
    if !annotations.is_empty() {
        layout.insert("annotations".into(), Value::Array(annotations));
    }

    Ok(Figure {
        data,
        layout: Value::Object(layout),
    })
}

fn cartesian_trace(
    spec: &ChartSpec,
    name: &str,
    rows: &[&Record],
    x_col: &str,
    y_col: &str,
    facet_idx: usize,
) -> Result<Value> {
    let xs = rows
        .iter()
        .map(|r| spec.cell(r, x_col).cloned())
        .collect::<Result<Vec<Value>>>()?;
    let ys = rows
        .iter()
        .map(|r| spec.cell(r, y_col).cloned())
        .collect::<Result<Vec<Value>>>()?;

    let mut trace = Map::new();
    match spec.kind {
        ChartKind::Line => {
            trace.insert("type".into(), json!("scatter"));
            let mode = if spec.markers { "lines+markers" } else { "lines" };
            trace.insert("mode".into(), json!(mode));
        }
        _ => {
            trace.insert("type".into(), json!("bar"));
            trace.insert("offsetgroup".into(), json!(name));
        }
    }
    trace.insert("name".into(), json!(name));
    trace.insert("legendgroup".into(), json!(name));
    trace.insert("showlegend".into(), json!(facet_idx == 0));
    trace.insert("x".into(), Value::Array(xs));
    trace.insert("y".into(), Value::Array(ys));
    trace.insert("xaxis".into(), json!(axis_id("x", facet_idx)));
    trace.insert("yaxis".into(), json!(axis_id("y", facet_idx)));
    apply_text(spec, &mut trace, rows)?;

    let series_prefix = match (&spec.color, spec.y.len() == 1) {
        (Some(color), true) => format!("{}={}<br>", spec.label_for(color), name),
        (None, false) => format!("{}={}<br>", spec.label_for("variable"), name),
        _ => String::new(),
    };
    let y_label = if spec.y.len() == 1 {
        spec.label_for(y_col)
    } else {
        spec.label_for("value")
    };
    trace.insert(
        "hovertemplate".into(),
        json!(format!(
            "{}{}=%{{x}}<br>{}=%{{y}}{}<extra></extra>",
            series_prefix,
            spec.label_for(x_col),
            y_label,
            hover_suffix(spec)
        )),
    );
    if let Some(custom) = customdata(spec, rows)? {
        trace.insert("customdata".into(), custom);
    }

    Ok(Value::Object(trace))
}

fn render_pie(spec: &ChartSpec, records: &[Record]) -> Result<Figure> {
    let names_col = spec.required(&spec.names, "names")?;
    let values_col = spec.required(&spec.values, "values")?;
    let rows: Vec<&Record> = records.iter().collect();

    let labels = rows
        .iter()
        .map(|r| spec.cell(r, names_col).cloned())
        .collect::<Result<Vec<Value>>>()?;
    let values = rows
        .iter()
        .map(|r| spec.cell(r, values_col).cloned())
        .collect::<Result<Vec<Value>>>()?;

    let mut trace = Map::new();
    trace.insert("type".into(), json!("pie"));
    trace.insert("labels".into(), Value::Array(labels));
    trace.insert("values".into(), Value::Array(values));
    if let Some(hole) = spec.hole {
        trace.insert("hole".into(), json!(hole));
    }
    trace.insert(
        "hovertemplate".into(),
        json!(format!(
            "{}=%{{label}}<br>{}=%{{value}}{}<extra></extra>",
            spec.label_for(names_col),
            spec.label_for(values_col),
            hover_suffix(spec)
        )),
    );
    if let Some(custom) = customdata(spec, &rows)? {
        trace.insert("customdata".into(), custom);
    }

    Ok(Figure {
        data: vec![Value::Object(trace)],
        layout: Value::Object(base_layout(spec)),
    })
}

struct Node<'r> {
    id: String,
    label: String,
    parent: String,
    value: f64,
    record: Option<&'r Record>,
}

/// Node id for a path. Labels may contain any character, so the id is the JSON
/// array of segments; the root (no segments) is `""`.
fn node_id(segments: &[String]) -> Result<String> {
    if segments.is_empty() {
        return Ok(String::new());
    }
    Ok(serde_json::to_string(segments)?)
}

/// Builds `ids/labels/parents/values` from the path columns. Empty path
/// segments are skipped, so a row with an empty parent sits at the root.
fn render_hierarchy(spec: &ChartSpec, records: &[Record]) -> Result<Figure> {
    if spec.path.is_empty() {
        return Err(spec.missing("path"));
    }
    let values_col = spec.required(&spec.values, "values")?;

    let mut nodes: Vec<Node> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for record in records {
        let mut segments = Vec::with_capacity(spec.path.len());
        for column in &spec.path {
            let label = cell_label(spec.cell(record, column)?);
            if !label.is_empty() {
                segments.push(label);
            }
        }
        if segments.is_empty() {
            continue;
        }
        let value = spec
            .cell(record, values_col)?
            .as_f64()
            .ok_or_else(|| EngineError::InvalidCell {
                chart: spec.title.clone(),
                column: values_col.to_string(),
            })?;

        // Intermediate levels that never appear as a row of their own.
        for depth in 1..segments.len() {
            let id = node_id(&segments[..depth])?;
            if !index.contains_key(&id) {
                index.insert(id.clone(), nodes.len());
                nodes.push(Node {
                    id,
                    label: segments[depth - 1].clone(),
                    parent: node_id(&segments[..depth - 1])?,
                    value: 0.0,
                    record: None,
                });
            }
        }

        let id = node_id(&segments)?;
        match index.get(&id) {
            Some(&i) => {
                nodes[i].value += value;
                nodes[i].record.get_or_insert(record);
            }
            None => {
                index.insert(id.clone(), nodes.len());
                nodes.push(Node {
                    id,
                    label: segments[segments.len() - 1].clone(),
                    parent: node_id(&segments[..segments.len() - 1])?,
                    value,
                    record: Some(record),
                });
            }
        }
    }

    let mut trace = Map::new();
    trace.insert("type".into(), json!(spec.kind));
    trace.insert("ids".into(), json!(nodes.iter().map(|n| &n.id).collect::<Vec<_>>()));
    trace.insert("labels".into(), json!(nodes.iter().map(|n| &n.label).collect::<Vec<_>>()));
    trace.insert("parents".into(), json!(nodes.iter().map(|n| &n.parent).collect::<Vec<_>>()));
    trace.insert("values".into(), json!(nodes.iter().map(|n| n.value).collect::<Vec<_>>()));
    trace.insert("branchvalues".into(), json!("remainder"));
    trace.insert(
        "hovertemplate".into(),
        json!(format!(
            "%{{label}}<br>{}=%{{value}}{}<extra></extra>",
            spec.label_for(values_col),
            hover_suffix(spec)
        )),
    );
    if !spec.hover.is_empty() {
        let custom = nodes
            .iter()
            .map(|node| {
                spec.hover
                    .iter()
                    .map(|field| match node.record {
                        Some(record) => spec.cell(record, &field.column).cloned(),
                        None => Ok(Value::Null),
                    })
                    .collect::<Result<Vec<Value>>>()
                    .map(Value::Array)
            })
            .collect::<Result<Vec<Value>>>()?;
        trace.insert("customdata".into(), Value::Array(custom));
    }

    Ok(Figure {
        data: vec![Value::Object(trace)],
        layout: Value::Object(base_layout(spec)),
    })
}
