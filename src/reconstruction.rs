//! Polyline assembly from a sequence of edge ids, with partial-edge
//! trimming at the start and end of a query that began or ended mid-edge,
//! per `spec.md` §4.8.

use crate::model::geometry::{polyline_length, GeometryError};
use crate::model::{EdgeGeometry, EdgeId};

#[derive(thiserror::Error, Debug)]
pub enum ReconstructionError {
    #[error("edge geometry lookup failed: {0}")]
    Geometry(#[from] GeometryError),
    #[error("cannot reconstruct a path with no edges and no same-edge partial segment")]
    EmptyPath,
}

/// The portion of edge `edge_id`'s whole-edge arc length to include,
/// `t_start..t_end` (both in `[0, 1]`, `t_start <= t_end`).
#[derive(Copy, Clone, Debug)]
pub struct PartialEdge {
    pub edge_id: EdgeId,
    pub t_start: f64,
    pub t_end: f64,
}

/// The point at whole-edge arc-length fraction `t` along `edge_id`'s
/// polyline.
pub fn interpolate_at_t(geometry: &EdgeGeometry, edge_id: EdgeId, t: f64) -> Result<(f64, f64), ReconstructionError> {
    let (xs, ys) = geometry.points(edge_id)?;
    let total = polyline_length(xs, ys);
    let target = t.clamp(0.0, 1.0) * total;

    let mut accum = 0.0;
    for i in 0..xs.len() - 1 {
        let seg_len = segment_length(xs[i], ys[i], xs[i + 1], ys[i + 1]);
        let seg_end = accum + seg_len;
        if target <= seg_end || i == xs.len() - 2 {
            let local_t = if seg_len > 0.0 {
                ((target - accum) / seg_len).clamp(0.0, 1.0)
            } else {
                0.0
            };
            return Ok((
                xs[i] + local_t * (xs[i + 1] - xs[i]),
                ys[i] + local_t * (ys[i + 1] - ys[i]),
            ));
        }
        accum = seg_end;
    }
    Ok((*xs.last().unwrap(), *ys.last().unwrap()))
}

/// The sub-polyline of `edge_id` spanning whole-edge arc-length fractions
/// `[t_start, t_end]`, including both trimmed endpoints and every original
/// vertex strictly between them.
pub fn extract_subedge(geometry: &EdgeGeometry, edge_id: EdgeId, t_start: f64, t_end: f64) -> Result<Vec<(f64, f64)>, ReconstructionError> {
    let (xs, ys) = geometry.points(edge_id)?;
    let total = polyline_length(xs, ys);
    let lo = t_start.clamp(0.0, 1.0) * total;
    let hi = t_end.clamp(0.0, 1.0) * total;

    let mut out = vec![interpolate_at_t(geometry, edge_id, t_start)?];
    let mut accum = 0.0;
    for i in 0..xs.len() - 1 {
        let seg_len = segment_length(xs[i], ys[i], xs[i + 1], ys[i + 1]);
        let seg_end = accum + seg_len;
        if seg_end > lo && seg_end < hi {
            out.push((xs[i + 1], ys[i + 1]));
        }
        accum = seg_end;
    }
    out.push(interpolate_at_t(geometry, edge_id, t_end)?);

    dedup_consecutive(&mut out);
    Ok(out)
}

/// Assemble the full route polyline: `edge_ids` in traversal order, with
/// the first and last edge optionally trimmed to a partial arc-length
/// range (an endpoint snapped mid-edge rather than exactly on a vertex).
/// Consecutive duplicate points at edge boundaries are suppressed.
pub fn assemble_route(
    geometry: &EdgeGeometry,
    edge_ids: &[EdgeId],
    start_partial: Option<PartialEdge>,
    end_partial: Option<PartialEdge>,
) -> Result<Vec<(f64, f64)>, ReconstructionError> {
    if edge_ids.is_empty() {
        return match (start_partial, end_partial) {
            (Some(p), _) | (_, Some(p)) => extract_subedge(geometry, p.edge_id, p.t_start, p.t_end),
            (None, None) => Err(ReconstructionError::EmptyPath),
        };
    }

    let mut out: Vec<(f64, f64)> = Vec::new();
    for (i, &edge_id) in edge_ids.iter().enumerate() {
        let is_first = i == 0;
        let is_last = i == edge_ids.len() - 1;

        let segment = if is_first && start_partial.is_some() {
            let p = start_partial.unwrap();
            extract_subedge(geometry, edge_id, p.t_start, 1.0)?
        } else if is_last && end_partial.is_some() {
            let p = end_partial.unwrap();
            extract_subedge(geometry, edge_id, 0.0, p.t_end)?
        } else {
            let (xs, ys) = geometry.points(edge_id)?;
            xs.iter().copied().zip(ys.iter().copied()).collect()
        };

        if out.last() == segment.first() {
            out.extend(segment.into_iter().skip(1));
        } else {
            out.extend(segment);
        }
    }
    dedup_consecutive(&mut out);
    Ok(out)
}

fn segment_length(ax: f64, ay: f64, bx: f64, by: f64) -> f64 {
    ((bx - ax).powi(2) + (by - ay).powi(2)).sqrt()
}

fn dedup_consecutive(points: &mut Vec<(f64, f64)>) {
    points.dedup_by(|a, b| (a.0 - b.0).abs() < 1e-9 && (a.1 - b.1).abs() < 1e-9);
}
