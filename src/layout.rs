//! Layout Merge
//!
//! Explicit deep-merge over the small part of a Plotly layout that the
//! dashboard rewrites: seven font sizes plus `width`, `height` and
//! `autosize`. Everything else in the layout is left untouched.
//!
//! Paths use Plotly's relayout notation (`xaxis.title.font.size`,
//! `xaxis.range[0]`).

use serde_json::{json, Map, Value};

/// Largest array index accepted in a relayout path
const MAX_PATH_INDEX: usize = 1024;

/// The seven font-size fields the dashboard scales
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontPath {
    Global,
    Title,
    XAxisTitle,
    XAxisTick,
    YAxisTitle,
    YAxisTick,
    Legend,
}

impl FontPath {
    /// All paths in canonical order
    pub const ALL: [FontPath; 7] = [
        FontPath::Global,
        FontPath::Title,
        FontPath::XAxisTitle,
        FontPath::XAxisTick,
        FontPath::YAxisTitle,
        FontPath::YAxisTick,
        FontPath::Legend,
    ];

    /// Relayout-style path of the size leaf
    pub fn dotted(self) -> &'static str {
        match self {
            FontPath::Global => "font.size",
            FontPath::Title => "title.font.size",
            FontPath::XAxisTitle => "xaxis.title.font.size",
            FontPath::XAxisTick => "xaxis.tickfont.size",
            FontPath::YAxisTitle => "yaxis.title.font.size",
            FontPath::YAxisTick => "yaxis.tickfont.size",
            FontPath::Legend => "legend.font.size",
        }
    }

    /// Size used when the layout does not set one
    pub fn default_size(self) -> f64 {
        match self {
            FontPath::Global => 12.0,
            FontPath::Title => 14.0,
            FontPath::XAxisTitle => 12.0,
            FontPath::XAxisTick => 10.0,
            FontPath::YAxisTitle => 12.0,
            FontPath::YAxisTick => 10.0,
            FontPath::Legend => 14.0,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Resolved sizes for all seven font paths
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontSizes([f64; 7]);

impl Default for FontSizes {
    fn default() -> Self {
        Self(FontPath::ALL.map(FontPath::default_size))
    }
}

impl FontSizes {
    /// Read sizes from a layout; absent, zero or non-numeric sizes use the defaults
    pub fn from_layout(layout: &Map<String, Value>) -> Self {
        Self(FontPath::ALL.map(|path| {
            get_path(layout, path.dotted())
                .and_then(Value::as_f64)
                .filter(|size| size.is_finite() && *size > 0.0)
                .unwrap_or_else(|| path.default_size())
        }))
    }

    /// Size for one path
    pub fn get(&self, path: FontPath) -> f64 {
        self.0[path.index()]
    }

    /// All sizes multiplied by `scale`
    pub fn scaled(&self, scale: f64) -> Self {
        Self(self.0.map(|size| size * scale))
    }

    /// `(path, size)` pairs in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (FontPath, f64)> + '_ {
        FontPath::ALL.iter().map(move |path| (*path, self.get(*path)))
    }
}

/// Overrides applied on top of a base layout
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutPatch {
    pub fonts: Option<FontSizes>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub autosize: Option<bool>,
}

impl LayoutPatch {
    /// Whether a relayout path is one this patch owns
    pub fn owns_path(path: &str) -> bool {
        matches!(path, "width" | "height" | "autosize")
            || FontPath::ALL.iter().any(|font| font.dotted() == path)
    }
}

/// Merge a patch over a base layout, keeping every field the patch does not set
pub fn merge_patch(base: &Map<String, Value>, patch: &LayoutPatch) -> Map<String, Value> {
    let mut merged = base.clone();

    if let Some(fonts) = &patch.fonts {
        for (path, size) in fonts.iter() {
            set_path(&mut merged, path.dotted(), json!(size));
        }
    }
    if let Some(width) = patch.width {
        merged.insert("width".to_string(), json!(width));
    }
    if let Some(height) = patch.height {
        merged.insert("height".to_string(), json!(height));
    }
    if let Some(autosize) = patch.autosize {
        merged.insert("autosize".to_string(), Value::Bool(autosize));
    }

    merged
}

// ============ Paths ============

#[derive(Debug, Clone, Copy, PartialEq)]
enum Segment<'a> {
    Key(&'a str),
    Index(usize),
}

fn parse_path(path: &str) -> Option<Vec<Segment<'_>>> {
    if path.is_empty() {
        return None;
    }

    let mut segments = Vec::new();
    for part in path.split('.') {
        let (name, mut rest) = match part.find('[') {
            Some(pos) => (&part[..pos], &part[pos..]),
            None => (part, ""),
        };
        if name.is_empty() {
            return None;
        }
        segments.push(Segment::Key(name));

        while !rest.is_empty() {
            let close = rest.find(']')?;
            let index: usize = rest.get(1..close)?.parse().ok()?;
            if !rest.starts_with('[') || index > MAX_PATH_INDEX {
                return None;
            }
            segments.push(Segment::Index(index));
            rest = &rest[close + 1..];
        }
    }
    Some(segments)
}

/// Read a value at a relayout path
pub fn get_path<'a>(layout: &'a Map<String, Value>, path: &str) -> Option<&'a Value> {
    let segments = parse_path(path)?;
    let (first, rest) = segments.split_first()?;
    let Segment::Key(key) = first else {
        return None;
    };

    let mut current = layout.get(*key)?;
    for segment in rest {
        current = match segment {
            Segment::Key(key) => current.get(*key)?,
            Segment::Index(index) => current.get(*index)?,
        };
    }
    Some(current)
}

/// Write a value at a relayout path, creating intermediate containers
///
/// Returns `false` when the path is malformed. A string found where an
/// object is needed is Plotly's title shorthand and becomes `{"text": ...}`.
pub fn set_path(layout: &mut Map<String, Value>, path: &str, leaf: Value) -> bool {
    let Some(segments) = parse_path(path) else {
        return false;
    };
    let Some((Segment::Key(key), rest)) = segments.split_first() else {
        return false;
    };

    let slot = layout.entry(key.to_string()).or_insert(Value::Null);
    set_value(slot, rest, leaf);
    true
}

fn set_value(slot: &mut Value, segments: &[Segment<'_>], leaf: Value) {
    let Some((head, rest)) = segments.split_first() else {
        *slot = leaf;
        return;
    };

    match head {
        Segment::Key(key) => {
            promote_to_object(slot);
            if let Value::Object(map) = slot {
                let child = map.entry(key.to_string()).or_insert(Value::Null);
                set_value(child, rest, leaf);
            }
        }
        Segment::Index(index) => {
            if !slot.is_array() {
                *slot = Value::Array(Vec::new());
            }
            if let Value::Array(items) = slot {
                if items.len() <= *index {
                    items.resize(index + 1, Value::Null);
                }
                set_value(&mut items[*index], rest, leaf);
            }
        }
    }
}

fn promote_to_object(slot: &mut Value) {
    match slot {
        Value::Object(_) => {}
        Value::String(text) => {
            let text = std::mem::take(text);
            *slot = json!({ "text": text });
        }
        _ => *slot = Value::Object(Map::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("layout must be an object"),
        }
    }

    #[test]
    fn test_defaults_for_empty_layout() {
        let sizes = FontSizes::from_layout(&Map::new());
        let expected = [12.0, 14.0, 12.0, 10.0, 12.0, 10.0, 14.0];
        for (i, (_, size)) in sizes.iter().enumerate() {
            assert_eq!(size, expected[i]);
        }
    }

    #[test]
    fn test_partial_sizes_mix_with_defaults() {
        let base = layout(json!({
            "font": {"size": 16},
            "xaxis": {"tickfont": {"size": 9}},
            "legend": {"font": {"size": 0}}
        }));
        let sizes = FontSizes::from_layout(&base);
        assert_eq!(sizes.get(FontPath::Global), 16.0);
        assert_eq!(sizes.get(FontPath::XAxisTick), 9.0);
        assert_eq!(sizes.get(FontPath::Title), 14.0);
        assert_eq!(sizes.get(FontPath::Legend), 14.0);
    }

    #[test]
    fn test_merge_keeps_siblings() {
        let base = layout(json!({
            "title": {"text": "Net Worth", "font": {"family": "Montserrat", "size": 20}},
            "xaxis": {"range": [0, 10], "title": "Date"},
            "paper_bgcolor": "#111"
        }));
        let patch = LayoutPatch {
            fonts: Some(FontSizes::from_layout(&base).scaled(2.0)),
            width: Some(640.0),
            height: Some(365.0),
            autosize: Some(false),
        };

        let merged = merge_patch(&base, &patch);

        assert_eq!(merged["title"]["text"], "Net Worth");
        assert_eq!(merged["title"]["font"]["family"], "Montserrat");
        assert_eq!(merged["title"]["font"]["size"], 40.0);
        assert_eq!(merged["xaxis"]["range"], json!([0, 10]));
        assert_eq!(merged["xaxis"]["title"]["text"], "Date");
        assert_eq!(merged["xaxis"]["title"]["font"]["size"], 24.0);
        assert_eq!(merged["paper_bgcolor"], "#111");
        assert_eq!(merged["width"], 640.0);
        assert_eq!(merged["autosize"], false);
        // base untouched
        assert_eq!(base["title"]["font"]["size"], 20);
    }

    #[test]
    fn test_set_and_get_indexed_path() {
        let mut base = Map::new();
        assert!(set_path(&mut base, "xaxis.range[1]", json!(42)));
        assert_eq!(base["xaxis"]["range"], json!([null, 42]));
        assert_eq!(get_path(&base, "xaxis.range[1]"), Some(&json!(42)));
        assert_eq!(get_path(&base, "yaxis.range[0]"), None);
    }

    #[test]
    fn test_malformed_paths_rejected() {
        let mut base = Map::new();
        assert!(!set_path(&mut base, "", json!(1)));
        assert!(!set_path(&mut base, "xaxis..range", json!(1)));
        assert!(!set_path(&mut base, "xaxis.range[x]", json!(1)));
        assert!(!set_path(&mut base, "xaxis.range[1", json!(1)));
        assert!(!set_path(&mut base, "[0]", json!(1)));
        assert!(base.is_empty());
    }

    #[test]
    fn test_owned_paths() {
        assert!(LayoutPatch::owns_path("width"));
        assert!(LayoutPatch::owns_path("legend.font.size"));
        assert!(!LayoutPatch::owns_path("xaxis.range[0]"));
    }
}
