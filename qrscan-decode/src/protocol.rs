//! Decoder request/response protocol
//!
//! One request carries one still-image bitmap; the response is an ordered
//! collection of matches. Each match is `(geometry, orientation, payload)`;
//! the scanner only consumes the payload of the first match, but the full
//! triple is modeled so richer consumers can use the positional metadata.

use qrscan_capture::FrameBitmap;

/// A point in frame-buffer pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    /// Horizontal coordinate
    pub x: u32,
    /// Vertical coordinate
    pub y: u32,
}

impl Point {
    /// Create a point
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Corner geometry of one detected code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchGeometry {
    /// Top-left corner
    pub top_left: Point,
    /// Top-right corner
    pub top_right: Point,
    /// Bottom-right corner
    pub bottom_right: Point,
    /// Bottom-left corner
    pub bottom_left: Point,
}

impl MatchGeometry {
    /// Axis-aligned geometry covering `width` x `height` from the origin
    pub const fn axis_aligned(width: u32, height: u32) -> Self {
        Self {
            top_left: Point::new(0, 0),
            top_right: Point::new(width, 0),
            bottom_right: Point::new(width, height),
            bottom_left: Point::new(0, height),
        }
    }
}

/// One decoded code within a frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeMatch {
    /// Where the code sits in the frame
    pub geometry: MatchGeometry,
    /// Rotation of the code, in degrees clockwise
    pub orientation: u16,
    /// Decoded payload
    pub payload: String,
}

impl DecodeMatch {
    /// Create a match with the given payload and default placement
    pub fn with_payload(payload: impl Into<String>) -> Self {
        Self {
            geometry: MatchGeometry::axis_aligned(0, 0),
            orientation: 0,
            payload: payload.into(),
        }
    }
}

/// A single decode request: one bitmap to inspect
#[derive(Debug, Clone)]
pub struct DecodeRequest {
    /// The frame to decode
    pub frame: FrameBitmap,
}

/// Response to one decode request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeResponse {
    /// Zero or more matches, in detection order
    pub matches: Vec<DecodeMatch>,
}

impl DecodeResponse {
    /// A response with no matches
    pub fn empty() -> Self {
        Self {
            matches: Vec::new(),
        }
    }

    /// Whether no code was found
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Payload of the first match, if any
    ///
    /// This is the only field the scan loop consumes.
    pub fn first_payload(&self) -> Option<&str> {
        self.matches.first().map(|m| m.payload.as_str())
    }
}

impl From<Vec<DecodeMatch>> for DecodeResponse {
    fn from(matches: Vec<DecodeMatch>) -> Self {
        Self { matches }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_payload() {
        let response = DecodeResponse::empty();
        assert!(response.is_empty());
        assert_eq!(response.first_payload(), None);

        let response = DecodeResponse::from(vec![
            DecodeMatch::with_payload("HELLO123"),
            DecodeMatch::with_payload("second"),
        ]);
        assert!(!response.is_empty());
        assert_eq!(response.first_payload(), Some("HELLO123"));
    }

    #[test]
    fn test_axis_aligned_geometry() {
        let geometry = MatchGeometry::axis_aligned(600, 400);
        assert_eq!(geometry.top_left, Point::new(0, 0));
        assert_eq!(geometry.bottom_right, Point::new(600, 400));
    }
}
