//! Collision layers and masks.
//!
//! A body sits on exactly one [`Layer`]; a query filters bodies with a
//! [`LayerMask`] of up to 32 layers.

use std::fmt;
use serde::{Serialize, Deserialize};

/// A single collision layer (0-31).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Layer(u8);

/// Layer index out of range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Layer index {0} out of range (0-31)")]
pub struct InvalidLayer(pub u8);

impl TryFrom<u8> for Layer {
    type Error = InvalidLayer;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Layer::new(index).ok_or(InvalidLayer(index))
    }
}

impl From<Layer> for u8 {
    fn from(layer: Layer) -> u8 {
        layer.0
    }
}

impl Layer {
    /// Layer for bodies nothing collides with by default.
    pub const DEFAULT: Self = Self(0);

    /// Layer for walls, actors and anything that stops a step.
    pub const BLOCKING: Self = Self(8);

    /// Layer for pickups and floor decoration.
    pub const ITEMS: Self = Self(9);

    /// Create a layer from its index. Returns `None` past 31.
    pub const fn new(index: u8) -> Option<Self> {
        if index < 32 { Some(Self(index)) } else { None }
    }

    /// Layer index.
    #[inline]
    pub const fn index(self) -> u8 {
        self.0
    }
}

/// Bit set of collision layers.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerMask(u32);

impl LayerMask {
    /// Matches nothing.
    pub const NONE: Self = Self(0);

    /// Matches every layer.
    pub const ALL: Self = Self(u32::MAX);

    /// Create from raw bits.
    #[inline]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Mask with a single layer set.
    #[inline]
    pub const fn of(layer: Layer) -> Self {
        Self(1 << layer.0)
    }

    /// Raw bits.
    #[inline]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Add a layer.
    #[inline]
    pub const fn with(self, layer: Layer) -> Self {
        Self(self.0 | (1 << layer.0))
    }

    /// Does this mask include `layer`?
    #[inline]
    pub const fn contains(self, layer: Layer) -> bool {
        self.0 & (1 << layer.0) != 0
    }
}

impl fmt::Debug for LayerMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LayerMask({:#010x})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_bounds() {
        assert_eq!(Layer::new(31).map(Layer::index), Some(31));
        assert!(Layer::new(32).is_none());
    }

    #[test]
    fn test_mask_contains() {
        let mask = LayerMask::of(Layer::BLOCKING);
        assert!(mask.contains(Layer::BLOCKING));
        assert!(!mask.contains(Layer::DEFAULT));

        let both = mask.with(Layer::ITEMS);
        assert!(both.contains(Layer::ITEMS));
        assert_eq!(both.bits(), (1 << 8) | (1 << 9));

        assert!(!LayerMask::NONE.contains(Layer::BLOCKING));
        assert!(LayerMask::ALL.contains(Layer::ITEMS));
    }

    #[test]
    fn test_mask_serde_is_plain_bits() {
        let json = serde_json::to_string(&LayerMask::of(Layer::BLOCKING)).unwrap();
        assert_eq!(json, "256");
        let back: LayerMask = serde_json::from_str("768").unwrap();
        assert!(back.contains(Layer::ITEMS));
    }

    #[test]
    fn test_layer_serde_rejects_out_of_range() {
        assert_eq!(serde_json::from_str::<Layer>("8").unwrap(), Layer::BLOCKING);
        assert!(serde_json::from_str::<Layer>("40").is_err());
    }
}
