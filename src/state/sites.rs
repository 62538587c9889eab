use std::path::Path;

use serde::Deserialize;

/// What a site measures. Streams carry flow, lakes carry surface elevation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteKind {
    Stream,
    Lake,
}

impl SiteKind {
    /// Decode the two-letter type code used in the site feature properties.
    pub fn from_code(code: &str) -> Result<Self, String> {
        match code {
            "ST" => Ok(SiteKind::Stream),
            "LK" => Ok(SiteKind::Lake),
            other => Err(format!("Unknown site type code: {other:?}")),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SiteKind::Stream => "Stream",
            SiteKind::Lake => "Lake",
        }
    }

    /// Header banner shown on the site window.
    pub fn measurement_label(&self) -> &'static str {
        match self {
            SiteKind::Stream => "STREAMFLOW",
            SiteKind::Lake => "LAKE ELEVATION",
        }
    }
}

/// One monitoring site from the catalog.
#[derive(Debug, Clone)]
pub struct Site {
    pub id: String,
    pub name: String,
    /// Agency station number; not every site has one.
    pub number: Option<String>,
    pub kind: SiteKind,
    pub lon: f64,
    pub lat: f64,
}

impl Site {
    /// "<number> <name>", or just the name when there is no station number.
    pub fn display_name(&self) -> String {
        match &self.number {
            Some(num) => format!("{num} {}", self.name),
            None => self.name.clone(),
        }
    }
}

// Just enough GeoJSON to read the site feature collection.
#[derive(Debug, Deserialize)]
struct GeoJsonFeatureCollection {
    features: Vec<GeoJsonFeature>,
}

#[derive(Debug, Deserialize)]
struct GeoJsonFeature {
    geometry: GeoJsonGeometry,
    properties: SiteProperties,
}

#[derive(Debug, Deserialize)]
struct GeoJsonGeometry {
    #[serde(rename = "type")]
    ty: String,
    coordinates: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct SiteProperties {
    #[serde(rename = "Id")]
    id: String,
    #[serde(rename = "SiteName")]
    name: String,
    #[serde(rename = "SiteNumber", default)]
    number: Option<String>,
    #[serde(rename = "SiteType")]
    site_type: String,
}

/// The read-only set of monitoring sites, loaded once at startup.
#[derive(Debug, Clone)]
pub struct SiteCatalog {
    pub sites: Vec<Site>,
}

impl SiteCatalog {
    pub fn load(path: &Path) -> Result<Self, String> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("Cannot read site catalog {}: {e}", path.display()))?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, String> {
        let fc: GeoJsonFeatureCollection =
            serde_json::from_str(text).map_err(|e| format!("Invalid site catalog: {e}"))?;

        let mut sites = Vec::with_capacity(fc.features.len());
        for feature in fc.features {
            if feature.geometry.ty != "Point" {
                continue;
            }
            let coords = feature
                .geometry
                .coordinates
                .as_array()
                .ok_or_else(|| "Invalid Point coordinates".to_string())?;
            if coords.len() < 2 {
                return Err(format!(
                    "Site {:?} has malformed coordinates",
                    feature.properties.id
                ));
            }
            let lon = coords[0].as_f64().unwrap_or(0.0);
            let lat = coords[1].as_f64().unwrap_or(0.0);
            let kind = SiteKind::from_code(&feature.properties.site_type)?;
            let number = feature
                .properties
                .number
                .filter(|n| !n.trim().is_empty());

            sites.push(Site {
                id: feature.properties.id,
                name: feature.properties.name,
                number,
                kind,
                lon,
                lat,
            });
        }

        Ok(Self { sites })
    }

    pub fn site_by_id(&self, id: &str) -> Option<&Site> {
        self.sites.iter().find(|s| s.id == id)
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    /// Lon/lat bounding box of all sites: ((lon_min, lat_min), (lon_max, lat_max)).
    pub fn bounds(&self) -> Option<((f64, f64), (f64, f64))> {
        let mut it = self.sites.iter();
        let first = it.next()?;
        let mut min = (first.lon, first.lat);
        let mut max = (first.lon, first.lat);
        for s in it {
            min.0 = min.0.min(s.lon);
            min.1 = min.1.min(s.lat);
            max.0 = max.0.max(s.lon);
            max.1 = max.1.max(s.lat);
        }
        Some((min, max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "geometry": { "type": "Point", "coordinates": [-114.05, 49.0] },
                "properties": { "Id": "S1", "SiteName": "North Fork", "SiteNumber": "05010000", "SiteType": "ST" }
            },
            {
                "type": "Feature",
                "geometry": { "type": "Point", "coordinates": [-113.9, 48.6] },
                "properties": { "Id": "L1", "SiteName": "Upper Lake", "SiteType": "LK" }
            }
        ]
    }"#;

    #[test]
    fn decodes_catalog_features() {
        let catalog = SiteCatalog::from_json(CATALOG).unwrap();
        assert_eq!(catalog.len(), 2);

        let stream = catalog.site_by_id("S1").unwrap();
        assert_eq!(stream.kind, SiteKind::Stream);
        assert_eq!(stream.display_name(), "05010000 North Fork");
        assert_eq!(stream.lon, -114.05);

        let lake = catalog.site_by_id("L1").unwrap();
        assert_eq!(lake.kind, SiteKind::Lake);
        assert_eq!(lake.number, None);
        assert_eq!(lake.display_name(), "Upper Lake");
    }

    #[test]
    fn unknown_site_id_is_none() {
        let catalog = SiteCatalog::from_json(CATALOG).unwrap();
        assert!(catalog.site_by_id("nope").is_none());
    }

    #[test]
    fn rejects_unknown_type_code() {
        let bad = CATALOG.replace("\"LK\"", "\"XX\"");
        assert!(SiteCatalog::from_json(&bad).is_err());
    }

    #[test]
    fn bounds_cover_all_sites() {
        let catalog = SiteCatalog::from_json(CATALOG).unwrap();
        let ((lon_min, lat_min), (lon_max, lat_max)) = catalog.bounds().unwrap();
        assert_eq!(lon_min, -114.05);
        assert_eq!(lat_min, 48.6);
        assert_eq!(lon_max, -113.9);
        assert_eq!(lat_max, 49.0);
    }
}
