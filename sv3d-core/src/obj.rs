//! Wavefront OBJ subset reader: `v`, `vn`, and `f` records.
//!
//! The reader is forgiving: unknown record types are skipped, missing
//! numeric fields fall back to zero, and faces with more than four corners
//! are truncated with a warning. Index errors surface later, when the mesh
//! is validated at object construction.

use std::fs;
use std::path::Path;

use nalgebra::{Point3, Vector3};
use nom::{
    bytes::complete::tag,
    character::complete::{char, i64, space1},
    combinator::opt,
    number::complete::float,
    sequence::{preceded, terminated},
    IResult,
};
use tracing::warn;

use crate::error::Error;
use crate::geometry::{Face, MeshData};

/// Parse OBJ text into an indexed mesh.
///
/// Never fails: lines that do not parse as a known record are ignored, so
/// the worst input yields an empty mesh.
pub fn parse_obj(input: &str) -> MeshData {
    let mut mesh = MeshData::default();

    for line in input.lines() {
        let line = line.trim();
        if let Ok((rest, _)) = record(line, "v") {
            let [x, y, z] = coords(rest);
            mesh.vertices.push(Point3::new(x, y, z));
        } else if let Ok((rest, _)) = record(line, "vn") {
            let [x, y, z] = coords(rest);
            mesh.normals.push(Vector3::new(x, y, z));
        } else if let Ok((rest, _)) = record(line, "f") {
            push_face(&mut mesh.faces, rest, line);
        }
    }

    mesh
}

/// Read and parse an OBJ file.
pub fn load_obj(path: impl AsRef<Path>) -> Result<MeshData, Error> {
    let text = fs::read_to_string(path.as_ref())?;
    Ok(parse_obj(&text))
}

/// Like `load_obj`, but an unreadable file yields an empty mesh so the
/// caller can keep going with empty geometry.
pub fn load_obj_or_empty(path: impl AsRef<Path>) -> MeshData {
    let path = path.as_ref();
    match load_obj(path) {
        Ok(mesh) => mesh,
        Err(error) => {
            warn!(path = %path.display(), %error, "failed to read mesh, continuing with empty geometry");
            MeshData::default()
        }
    }
}

/// Match a record keyword followed by at least one space, so `v` does not
/// swallow `vn` or `vt` lines.
fn record<'a>(line: &'a str, keyword: &'static str) -> IResult<&'a str, &'a str> {
    terminated(tag(keyword), space1)(line)
}

/// Up to three whitespace-separated floats; absent fields become 0.
fn coords(input: &str) -> [f32; 3] {
    match coord_triplet(input) {
        Ok((_, triplet)) => triplet,
        Err(_) => [0.0, 0.0, 0.0],
    }
}

fn coord_triplet(input: &str) -> IResult<&str, [f32; 3]> {
    let (input, x) = opt(float)(input)?;
    let (input, y) = opt(preceded(space1, float))(input)?;
    let (input, z) = opt(preceded(space1, float))(input)?;
    Ok((
        input,
        [x.unwrap_or(0.0), y.unwrap_or(0.0), z.unwrap_or(0.0)],
    ))
}

/// One `v[/vt][/vn]` face element. The texture index is parsed and
/// discarded; only the vertex and normal slots matter here.
fn face_element(input: &str) -> IResult<&str, (Option<i64>, Option<i64>)> {
    let (input, vertex) = opt(i64)(input)?;
    let (input, _texture) = opt(preceded(char('/'), opt(i64)))(input)?;
    let (input, normal) = opt(preceded(char('/'), opt(i64)))(input)?;
    Ok((input, (vertex, normal.flatten())))
}

/// OBJ indices are 1-based; missing or non-positive values fall back to
/// slot 0 rather than failing the whole face.
fn zero_based(index: Option<i64>) -> usize {
    match index {
        Some(i) if i > 0 => (i - 1) as usize,
        _ => 0,
    }
}

fn element_indices(part: &str) -> (usize, usize) {
    match face_element(part) {
        Ok((_, (vertex, normal))) => (zero_based(vertex), zero_based(normal)),
        Err(_) => (0, 0),
    }
}

fn push_face(faces: &mut Vec<Face>, elements: &str, line: &str) {
    let parsed: Vec<(usize, usize)> = elements.split_whitespace().map(element_indices).collect();
    let corner = |i: usize| parsed.get(i).copied().unwrap_or((0, 0));

    let (a, b, c) = (corner(0), corner(1), corner(2));
    faces.push(Face::new([a.0, b.0, c.0], [a.1, b.1, c.1]));

    // Quads split into a fan on the first corner; anything wider loses its
    // extra corners.
    if parsed.len() == 4 {
        let d = corner(3);
        faces.push(Face::new([a.0, c.0, d.0], [a.1, c.1, d.1]));
    } else if parsed.len() > 4 {
        warn!(%line, "face has more than 4 corners, keeping the first triangle");
    }
}
