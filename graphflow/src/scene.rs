//! Conversion of [`GraphData`](crate::GraphData) into the Excalidraw-style
//! scene document the rendering engine consumes.
//!
//! The conversion is deterministic: element seeds are derived by hashing
//! stable inputs, so the same graph always yields a byte-identical scene.

use crate::GraphData;
use serde_json::{json, Value};
use std::hash::{DefaultHasher, Hash, Hasher};

fn seed_from<T: Hash>(value: &T) -> u32 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    (hasher.finish() & 0xFFFF_FFFF) as u32
}

fn builtin_emoji(name: &str) -> &'static str {
    match name.to_lowercase().as_str() {
        "salesperson" | "sales" => "\u{1f9d1}\u{200d}\u{1f4bc}",
        "email" => "\u{1f4e8}",
        "database" | "db" => "\u{1f5c4}\u{fe0f}",
        "model" => "\u{1f9e0}",
        "search" => "\u{1f50e}",
        _ => "\u{1f4cc}",
    }
}

// Wider boxes for longer labels to reduce overlap.
fn node_size(label: &str) -> (f64, f64) {
    let width = (label.len() as f64 * 10.0 + 30.0).max(100.0);
    (width, 48.0)
}

fn color_or(default_hex: &str, color: &str) -> String {
    if color.trim().is_empty() {
        default_hex.to_string()
    } else {
        color.to_string()
    }
}

/// Convert graph data to a scene, optionally appending decoration icons.
#[must_use]
pub fn scene_from_graph_with_options(graph: &GraphData, allow_images: bool) -> Value {
    let mut scene = scene_from_graph(graph);
    if !allow_images {
        return scene;
    }

    let Some(decorations) = graph.decorations.as_ref() else {
        return scene;
    };

    let mut extra_elements: Vec<Value> = Vec::new();
    for decoration in decorations {
        let mut cx = f64::from(decoration.at_x.unwrap_or(0.0));
        let mut cy = f64::from(decoration.at_y.unwrap_or(0.0));
        if let Some(target_id) = &decoration.target {
            if let Some(node) = graph.nodes.iter().find(|node| &node.id == target_id) {
                cx = f64::from(node.x);
                cy = f64::from(node.y);
            }
        }
        if let Some(offset) = &decoration.offset {
            cx += f64::from(offset.dx);
            cy += f64::from(offset.dy);
        }

        let label = match (&decoration.builtin, &decoration.text) {
            (Some(builtin), _) => builtin_emoji(builtin).to_string(),
            (None, Some(text)) => text.clone(),
            (None, None) => String::new(),
        };
        if label.is_empty() {
            continue;
        }

        let (w, h) = decoration
            .size
            .as_ref()
            .map_or((20.0, 20.0), |size| (f64::from(size.w), f64::from(size.h)));
        let seed = seed_from(&(label.clone(), cx as i64, cy as i64));
        extra_elements.push(json!({
            "type": "text",
            "version": 1,
            "versionNonce": i64::from(seed),
            "isDeleted": false,
            "id": format!("decor-{label}-{seed}"),
            "seed": seed,
            "fillStyle": "hachure",
            "strokeWidth": 1,
            "strokeStyle": "solid",
            "roughness": 0,
            "opacity": 100,
            "angle": 0,
            "x": cx - w / 2.0,
            "y": cy - h / 2.0,
            "strokeColor": "#111827",
            "backgroundColor": "transparent",
            "width": w,
            "height": h,
            "boundElements": [],
            "updated": 0,
            "text": label,
            "fontSize": 16,
            "fontFamily": 1,
            "textAlign": "center",
            "verticalAlign": "middle",
            "baseline": 16
        }));
    }

    if let Some(elements) = scene.get_mut("elements").and_then(Value::as_array_mut) {
        elements.extend(extra_elements);
    }
    scene
}

/// Convert graph data to an Excalidraw-style scene document.
///
/// Elements are layered arrows first, rectangles above them, labels on
/// top, so connectors never overdraw node text.
#[must_use]
pub fn scene_from_graph(graph: &GraphData) -> Value {
    let mut arrows: Vec<Value> = Vec::new();
    let mut rects: Vec<Value> = Vec::new();
    let mut texts: Vec<Value> = Vec::new();

    for node in &graph.nodes {
        let seed = seed_from(&node.id);
        let (w, h) = node_size(&node.label);
        let background = color_or("#FFFFFF", &node.style.color);
        let stroke = "#111827";
        let x = f64::from(node.x);
        let y = f64::from(node.y);

        rects.push(json!({
            "type": "rectangle",
            "version": 1,
            "versionNonce": i64::from(seed),
            "isDeleted": false,
            "id": format!("node-{}", node.id),
            "seed": seed,
            "fillStyle": "hachure",
            "strokeWidth": 2,
            "strokeStyle": "solid",
            "roughness": 1,
            "opacity": 100,
            "angle": 0,
            "x": x - w / 2.0,
            "y": y - h / 2.0,
            "strokeColor": stroke,
            "backgroundColor": background,
            "width": w,
            "height": h,
            "boundElements": [],
            "updated": 0,
            "roundness": {"type": 3}
        }));

        let text_seed = seed_from(&(node.id.clone(), "text"));
        let text_w = (node.label.len() as f64 * 9.0).min(w - 16.0).max(24.0);
        let text_h = 24.0;
        texts.push(json!({
            "type": "text",
            "version": 1,
            "versionNonce": i64::from(text_seed),
            "isDeleted": false,
            "id": format!("node-label-{}", node.id),
            "seed": text_seed,
            "fillStyle": "hachure",
            "strokeWidth": 1,
            "strokeStyle": "solid",
            "roughness": 0,
            "opacity": 100,
            "angle": 0,
            "x": x - text_w / 2.0,
            "y": y - text_h / 2.0,
            "strokeColor": stroke,
            "backgroundColor": "transparent",
            "width": text_w,
            "height": text_h,
            "boundElements": [],
            "updated": 0,
            "text": node.label,
            "fontSize": 16,
            "fontFamily": 1,
            "textAlign": "center",
            "verticalAlign": "middle",
            "baseline": 18
        }));
    }

    for edge in &graph.edges {
        let seed = seed_from(&edge.id);
        let source = graph.nodes.iter().find(|node| node.id == edge.source);
        let target = graph.nodes.iter().find(|node| node.id == edge.target);
        let (Some(source), Some(target)) = (source, target) else {
            continue;
        };

        let (sw, sh) = node_size(&source.label);
        let (tw, th) = node_size(&target.label);
        let sx = f64::from(source.x);
        let sy = f64::from(source.y);
        let tx = f64::from(target.x);
        let ty = f64::from(target.y);

        // Clip endpoints to the rectangle borders so arrows do not cross
        // into the nodes.
        let (start_x, start_y) = border_intersection(sx, sy, sw, sh, tx, ty);
        let (end_x, end_y) = border_intersection(tx, ty, tw, th, sx, sy);
        let dx = end_x - start_x;
        let dy = end_y - start_y;

        arrows.push(json!({
            "type": "arrow",
            "version": 1,
            "versionNonce": i64::from(seed),
            "isDeleted": false,
            "id": format!("edge-{}", edge.id),
            "seed": seed,
            "fillStyle": "hachure",
            "strokeWidth": 2,
            "strokeStyle": "solid",
            "roughness": 1,
            "opacity": 100,
            "angle": 0,
            "x": start_x,
            "y": start_y,
            "strokeColor": "#111827",
            "backgroundColor": "transparent",
            "width": dx.abs(),
            "height": dy.abs(),
            "boundElements": [],
            "updated": 0,
            "startBinding": Value::Null,
            "endBinding": Value::Null,
            "lastCommittedPoint": Value::Null,
            "points": [[0.0, 0.0], [dx, dy]],
            "startArrowhead": Value::Null,
            "endArrowhead": "arrow"
        }));

        if !edge.label.is_empty() {
            let mid_x = (start_x + end_x) / 2.0;
            let mid_y = (start_y + end_y) / 2.0;
            // Offset the label perpendicular to the edge by 12px.
            let vx = end_x - start_x;
            let vy = end_y - start_y;
            let vlen = (vx * vx + vy * vy).sqrt().max(1.0);
            let nx = -vy / vlen;
            let ny = vx / vlen;
            let off = 12.0;
            let lx = mid_x + nx * off;
            let ly = mid_y + ny * off;
            let lw = (edge.label.len() as f64 * 9.0 + 8.0).max(24.0);
            let lh = 20.0;
            let label_seed = seed_from(&(edge.id.clone(), "label"));
            texts.push(json!({
                "type": "text",
                "version": 1,
                "versionNonce": i64::from(label_seed),
                "isDeleted": false,
                "id": format!("edge-label-{}", edge.id),
                "seed": label_seed,
                "fillStyle": "hachure",
                "strokeWidth": 1,
                "strokeStyle": "solid",
                "roughness": 0,
                "opacity": 100,
                "angle": 0,
                "x": lx - lw / 2.0,
                "y": ly - lh / 2.0,
                "strokeColor": "#111827",
                "backgroundColor": "transparent",
                "width": lw,
                "height": lh,
                "boundElements": [],
                "updated": 0,
                "text": edge.label,
                "fontSize": 14,
                "fontFamily": 1,
                "textAlign": "center",
                "verticalAlign": "middle",
                "baseline": 16
            }));
        }
    }

    let background = graph
        .global_style
        .as_ref()
        .map_or_else(|| "#FFFFFF".to_string(), |style| style.background.clone());

    let mut elements = Vec::new();
    elements.extend(arrows);
    elements.extend(rects);
    elements.extend(texts);

    json!({
        "type": "excalidraw",
        "version": 2,
        "source": "graphflow",
        "elements": elements,
        "appState": {
            "viewBackgroundColor": background,
            "gridSize": 0
        },
        "files": {}
    })
}

// Intersection of a rectangle border with the ray from the rectangle
// center (cx, cy) toward (tx, ty), pulled back 2px off the stroke.
fn border_intersection(cx: f64, cy: f64, w: f64, h: f64, tx: f64, ty: f64) -> (f64, f64) {
    let dx = tx - cx;
    let dy = ty - cy;

    let mut t: Option<f64> = None;
    if dx != 0.0 {
        t = Some((w / 2.0) / dx.abs());
    }
    if dy != 0.0 {
        let candidate = (h / 2.0) / dy.abs();
        t = Some(t.map_or(candidate, |current| current.min(candidate)));
    }
    let t = t.unwrap_or(0.0);

    let inset = 2.0;
    let norm = dx.hypot(dy).max(1.0);
    let ux = dx / norm;
    let uy = dy / norm;
    (cx + dx * t - ux * inset, cy + dy * t - uy * inset)
}
