//! Sample points as entered on the chart.
//!
//! A [`SamplePoint`] is an `(x, y)` pair with an optional label and colour. Only the
//! coordinates take part in the fit; the rest is carried along for display.
use std::fmt;

use rand::Rng;

use crate::{
    error::{Error, Result},
    value::Value,
};

/// A CSS colour string, e.g. `#3b82f6` or `hsl(210, 70%, 60%)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Color(String);
impl Color {
    /// Wraps a CSS colour string as-is.
    pub fn new(css: impl Into<String>) -> Self {
        Self(css.into())
    }

    /// A colour with a random hue at 70% saturation and 60% lightness.
    #[must_use]
    pub fn random() -> Self {
        Self::random_with(&mut rand::rng())
    }

    /// Like [`Color::random`], drawing the hue from the given generator.
    pub fn random_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let hue: u16 = rng.random_range(0..360);
        Self(format!("hsl({hue}, 70%, 60%)"))
    }

    /// The CSS string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single point on the chart.
///
/// Deserializes from `{ "x": 3.0, "y": 7.0 }`, with optional `label` and `color`.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SamplePoint<T: Value = f64> {
    /// Horizontal coordinate (power)
    pub x: T,

    /// Vertical coordinate (policy)
    pub y: T,

    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Display colour
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
}
impl<T: Value> SamplePoint<T> {
    /// An unlabelled point.
    pub fn new(x: T, y: T) -> Self {
        Self {
            x,
            y,
            label: None,
            color: None,
        }
    }

    /// A labelled, coloured point.
    pub fn labelled(x: T, y: T, label: impl Into<String>, color: Color) -> Self {
        Self {
            x,
            y,
            label: Some(label.into()),
            color: Some(color),
        }
    }

    /// The `(x, y)` pair used for fitting.
    pub fn coords(&self) -> (T, T) {
        (self.x, self.y)
    }
}

impl<T: Value> From<(T, T)> for SamplePoint<T> {
    fn from((x, y): (T, T)) -> Self {
        Self::new(x, y)
    }
}

/// An ordered list of points.
///
/// Insertion order is kept as entered. Fitting does not depend on it; use
/// [`PointSet::sorted_by_x`] to get the order the chart draws in.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct PointSet<T: Value = f64> {
    points: Vec<SamplePoint<T>>,
}
impl<T: Value> PointSet<T> {
    /// An empty set.
    #[must_use]
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    /// Appends a point.
    pub fn push(&mut self, point: SamplePoint<T>) {
        self.points.push(point);
    }

    /// Removes and returns the point at `index`.
    ///
    /// # Errors
    /// Returns [`Error::IndexOutOfRange`] if there is no such point.
    pub fn remove(&mut self, index: usize) -> Result<SamplePoint<T>> {
        if index >= self.points.len() {
            return Err(Error::IndexOutOfRange {
                index,
                len: self.points.len(),
            });
        }
        Ok(self.points.remove(index))
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True if there are no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The point at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&SamplePoint<T>> {
        self.points.get(index)
    }

    /// Iterates points in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, SamplePoint<T>> {
        self.points.iter()
    }

    /// The `(x, y)` pairs in insertion order.
    pub fn coords(&self) -> Vec<(T, T)> {
        self.points.iter().map(SamplePoint::coords).collect()
    }

    /// The `(x, y)` pairs in ascending x order.
    ///
    /// The sort is stable, so points sharing an x keep their insertion order.
    pub fn sorted_by_x(&self) -> Vec<(T, T)> {
        let mut coords = self.coords();
        coords.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
        coords
    }
}

impl<T: Value> Default for PointSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Value> FromIterator<SamplePoint<T>> for PointSet<T> {
    fn from_iter<I: IntoIterator<Item = SamplePoint<T>>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

impl<'a, T: Value> IntoIterator for &'a PointSet<T> {
    type Item = &'a SamplePoint<T>;
    type IntoIter = std::slice::Iter<'a, SamplePoint<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::SmallRng, SeedableRng};

    use super::*;

    #[test]
    fn test_random_color_format() {
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..50 {
            let color = Color::random_with(&mut rng);
            let css = color.as_str();
            assert!(css.starts_with("hsl(") && css.ends_with(", 70%, 60%)"), "{css}");

            let hue: u16 = css[4..css.find(',').unwrap()].parse().unwrap();
            assert!(hue < 360);
        }
    }

    #[test]
    fn test_point_set_edit() {
        let mut set: PointSet = [(3.0, 7.0), (8.0, 2.0), (5.0, 9.0)]
            .into_iter()
            .map(SamplePoint::from)
            .collect();
        assert_eq!(set.len(), 3);

        let removed = set.remove(1).unwrap();
        assert_eq!(removed.coords(), (8.0, 2.0));
        assert_eq!(set.coords(), vec![(3.0, 7.0), (5.0, 9.0)]);

        assert_eq!(
            set.remove(2),
            Err(Error::IndexOutOfRange { index: 2, len: 2 })
        );
    }

    #[test]
    fn test_sorted_by_x() {
        let mut set = PointSet::new();
        set.push(SamplePoint::new(9.0, 6.0));
        set.push(SamplePoint::new(2.0, 4.0));
        set.push(SamplePoint::new(6.0, 3.0));
        set.push(SamplePoint::new(2.0, 1.0));

        assert_eq!(
            set.sorted_by_x(),
            vec![(2.0, 4.0), (2.0, 1.0), (6.0, 3.0), (9.0, 6.0)]
        );

        // Insertion order is untouched
        assert_eq!(set.get(0).map(SamplePoint::coords), Some((9.0, 6.0)));
    }

    #[test]
    fn test_point_serde() {
        let point: SamplePoint = serde_json::from_str(
            r##"{"x": 3, "y": 7, "label": "Healthcare Reform", "color": "#3b82f6"}"##,
        ).unwrap();
        assert_eq!(point.coords(), (3.0, 7.0));
        assert_eq!(point.label.as_deref(), Some("Healthcare Reform"));
        assert_eq!(point.color, Some(Color::new("#3b82f6")));

        let bare = serde_json::to_string(&SamplePoint::new(1.0, 2.0)).unwrap();
        assert_eq!(bare, r#"{"x":1.0,"y":2.0}"#);
    }
}
