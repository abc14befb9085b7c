use std::collections::BTreeMap;

use crate::{
    anim::{Property, PropertyMap},
    core::ElementId,
};

/// Sink for values produced by the drivers (the render side of the stage).
pub trait Surface {
    fn apply_property(&mut self, element: &ElementId, property: Property, value: f64);

    /// Integer shown as text, written by the counter animator.
    fn apply_count(&mut self, element: &ElementId, value: u64);

    fn apply_properties(&mut self, element: &ElementId, values: &PropertyMap) {
        for (&property, &value) in values {
            self.apply_property(element, property, value);
        }
    }
}

/// In-memory surface recording the latest value of every property.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct PropertySurface {
    pub properties: BTreeMap<ElementId, PropertyMap>,
    pub counts: BTreeMap<ElementId, u64>,
    #[serde(skip)]
    writes: usize,
}

impl PropertySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, element: &ElementId, property: Property) -> Option<f64> {
        self.properties.get(element)?.get(&property).copied()
    }

    /// Value as rendered: untouched properties report their rest value.
    pub fn resolved(&self, element: &ElementId, property: Property) -> f64 {
        self.get(element, property)
            .unwrap_or_else(|| property.rest_value())
    }

    pub fn count(&self, element: &ElementId) -> Option<u64> {
        self.counts.get(element).copied()
    }

    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl Surface for PropertySurface {
    fn apply_property(&mut self, element: &ElementId, property: Property, value: f64) {
        self.writes += 1;
        self.properties
            .entry(element.clone())
            .or_default()
            .insert(property, value);
    }

    fn apply_count(&mut self, element: &ElementId, value: u64) {
        self.writes += 1;
        self.counts.insert(element.clone(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anim::props;

    #[test]
    fn records_latest_values() {
        let mut s = PropertySurface::new();
        let id = ElementId::from("card");
        s.apply_properties(&id, &props([(Property::Y, 10.0), (Property::Opacity, 0.2)]));
        s.apply_property(&id, Property::Y, 4.0);
        assert_eq!(s.get(&id, Property::Y), Some(4.0));
        assert_eq!(s.resolved(&id, Property::Scale), 1.0);
        assert_eq!(s.writes(), 3);
    }
}
