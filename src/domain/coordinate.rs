use serde::de::Error;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A geographic point. Serialized as a `[longitude, latitude]` pair, the
/// GeoJSON axis order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coordinate {
    pub longitude: f64,
    pub latitude: f64,
}

impl Serialize for Coordinate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        (self.longitude, self.latitude).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Coordinate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let (longitude, latitude) = <(f64, f64)>::deserialize(deserializer)?;
        Ok(Coordinate { longitude, latitude })
    }
}

/// A rectangular viewport. Fixed configuration, not mutated at runtime.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportBound {
    pub min_lon: f64,
    pub max_lon: f64,
    pub min_lat: f64,
    pub max_lat: f64,
}

impl ViewportBound {
    /// Clamps each axis independently into the bound.
    pub fn clamp(&self, coordinate: Coordinate) -> Coordinate {
        Coordinate {
            longitude: coordinate.longitude.clamp(self.min_lon, self.max_lon),
            latitude: coordinate.latitude.clamp(self.min_lat, self.max_lat),
        }
    }

    pub fn contains(&self, coordinate: &Coordinate) -> bool {
        coordinate.longitude >= self.min_lon
            && coordinate.longitude <= self.max_lon
            && coordinate.latitude >= self.min_lat
            && coordinate.latitude <= self.max_lat
    }
}

impl<'de> Deserialize<'de> for ViewportBound {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Debug, Deserialize)]
        pub struct Inner {
            min_lon: f64,
            max_lon: f64,
            min_lat: f64,
            max_lat: f64,
        }

        let inner = Inner::deserialize(deserializer)?;
        if !(inner.min_lon < inner.max_lon) {
            return Err(Error::custom(format!(
                "invalid viewport bound: min_lon {} must be smaller than max_lon {}",
                inner.min_lon, inner.max_lon
            )));
        }

        if !(inner.min_lat < inner.max_lat) {
            return Err(Error::custom(format!(
                "invalid viewport bound: min_lat {} must be smaller than max_lat {}",
                inner.min_lat, inner.max_lat
            )));
        }

        Ok(ViewportBound {
            min_lon: inner.min_lon,
            max_lon: inner.max_lon,
            min_lat: inner.min_lat,
            max_lat: inner.max_lat,
        })
    }
}
