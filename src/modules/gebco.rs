//! General Bathymetric Chart of the Oceans (GEBCO) module.
//!
//! GEBCO publishes a global terrain model at ~15 arc-seconds (~500 m).
//! Regional subsets are served over WCS (hosted by EMODnet/BODC); the
//! full dataset is also available as zipped GeoTIFF bulk downloads.

use url::form_urlencoded;

use super::registry::{ModuleDescriptor, OptionKind, OptionSpec};
use super::traits::{FetchModule, ModuleError};
use super::types::{DataType, ModuleArgs, Region, ResultEntry, ResultSet};

const GEBCO_WCS_URL: &str =
    "https://www.gebco.net/data_and_products/gebco_web_services/2024/mapserv";

const GEBCO_GLOBAL_GRID_URL: &str =
    "https://www.bodc.ac.uk/data/open_download/gebco/gebco_2024/geotiff/";
const GEBCO_GLOBAL_TID_URL: &str =
    "https://www.bodc.ac.uk/data/open_download/gebco/gebco_2024_tid/geotiff/";
const GEBCO_GLOBAL_SUB_ICE_URL: &str =
    "https://www.bodc.ac.uk/data/open_download/gebco/gebco_2024_sub_ice_topo/geotiff/";

pub const DESCRIPTOR: ModuleDescriptor = ModuleDescriptor {
    name: "gebco",
    help: "General Bathymetric Chart of the Oceans (GEBCO)",
    options: &[
        OptionSpec {
            name: "layer",
            help: "Dataset layer: 'grid' (elevation), 'tid' (type identifier), 'sub_ice' (under ice)",
            kind: OptionKind::Text,
        },
        OptionSpec {
            name: "global_grid",
            help: "Download the full global dataset instead of a regional subset",
            kind: OptionKind::Flag,
        },
    ],
};

pub fn factory(region: Option<Region>, args: ModuleArgs) -> Box<dyn FetchModule> {
    Box::new(Gebco::new(region, &args))
}

/// Dataset layer selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Layer {
    #[default]
    Grid,
    Tid,
    SubIce,
}

impl Layer {
    /// Total over arbitrary input: `elevation` is a synonym for `grid`,
    /// and any unrecognized selector falls back to `grid`. The fallback
    /// is deliberate policy, not an omission — a typo fetches the
    /// default layer rather than nothing.
    fn from_option(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "grid" | "elevation" => Layer::Grid,
            "tid" => Layer::Tid,
            "sub_ice" => Layer::SubIce,
            other => {
                tracing::debug!(layer = other, "Unrecognized layer, using 'grid'");
                Layer::Grid
            }
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            Layer::Grid => "grid",
            Layer::Tid => "tid",
            Layer::SubIce => "sub_ice",
        }
    }

    fn coverage_id(&self) -> &'static str {
        match self {
            Layer::Grid => "GEBCO_2024_Grid",
            Layer::Tid => "GEBCO_2024_TID",
            Layer::SubIce => "GEBCO_2024_Sub_Ice_Topo",
        }
    }

    fn global_key(&self) -> &'static str {
        match self {
            Layer::Grid => "2024",
            Layer::Tid => "2024_tid",
            Layer::SubIce => "2024_sub_ice",
        }
    }

    fn global_url(&self) -> &'static str {
        match self {
            Layer::Grid => GEBCO_GLOBAL_GRID_URL,
            Layer::Tid => GEBCO_GLOBAL_TID_URL,
            Layer::SubIce => GEBCO_GLOBAL_SUB_ICE_URL,
        }
    }
}

/// GEBCO bathymetry fetcher.
///
/// Two mutually exclusive modes, selected by the `global_grid` option:
/// regional WCS subsetting (default, requires a region) and global bulk
/// download (ignores the region). Either mode plans exactly one entry.
pub struct Gebco {
    region: Option<Region>,
    layer: Layer,
    global_grid: bool,
    results: ResultSet,
}

impl Gebco {
    pub fn new(region: Option<Region>, args: &ModuleArgs) -> Self {
        Self {
            region,
            layer: Layer::from_option(args.get_str_or("layer", "grid")),
            global_grid: args.get_bool("global_grid", false),
            results: ResultSet::new(),
        }
    }

    /// Plan a regional subset via WCS 1.3.0 GetCoverage.
    fn plan_wcs_subset(&mut self) {
        let Some(region) = self.region else {
            tracing::debug!("No region set, nothing to plan");
            return;
        };

        // WCS 1.3.0 BBOX is lat/lon axis order: south,west,north,east.
        // The reordering from the natural west/east/south/north input is
        // load-bearing; a wrong order returns wrong data, not an error.
        let bbox = format!(
            "{},{},{},{}",
            region.south, region.west, region.north, region.east
        );

        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("SERVICE", "WCS")
            .append_pair("VERSION", "1.3.0")
            .append_pair("REQUEST", "GetCoverage")
            .append_pair("COVERAGE", self.layer.coverage_id())
            .append_pair("CRS", "EPSG:4326")
            .append_pair("BBOX", &bbox)
            .append_pair("FORMAT", "image/tiff")
            .append_pair("RESPONSE_CRS", "EPSG:4326")
            .finish();

        let entry = ResultEntry::builder()
            .url(format!("{GEBCO_WCS_URL}?{query}"))
            .dest_name(format!(
                "gebco_{}_{}.tif",
                self.layer.as_str(),
                region.path_token()
            ))
            .data_type(DataType::Geotiff)
            .agency("GEBCO / BODC")
            .title(format!(
                "GEBCO 2024 {}",
                self.layer.as_str().to_uppercase()
            ))
            .build();

        self.results.add_entry(entry);
    }

    /// Plan the full global zip.
    fn plan_global_download(&mut self) {
        let key = self.layer.global_key();

        let entry = ResultEntry::builder()
            .url(self.layer.global_url())
            .dest_name(format!("gebco_{key}.zip"))
            .data_type(DataType::Zip)
            .agency("GEBCO / BODC")
            .title(format!("Global GEBCO {key} (full)"))
            .build();

        self.results.add_entry(entry);
    }
}

impl FetchModule for Gebco {
    fn name(&self) -> &'static str {
        "gebco"
    }

    fn run(&mut self) -> Result<(), ModuleError> {
        if self.global_grid {
            self.plan_global_download();
        } else {
            self.plan_wcs_subset();
        }
        Ok(())
    }

    fn results(&self) -> &[ResultEntry] {
        self.results.as_slice()
    }

    fn take_results(&mut self) -> Vec<ResultEntry> {
        self.results.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region() -> Region {
        Region::new(-10.5, 5.0, 40.0, 50.25).unwrap()
    }

    fn run_gebco(region: Option<Region>, pairs: &[(&str, &str)]) -> Vec<ResultEntry> {
        let args = ModuleArgs::from_pairs(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string())),
        );
        let mut module = Gebco::new(region, &args);
        module.run().unwrap();
        module.take_results()
    }

    #[test]
    fn test_regional_mode_is_deterministic() {
        let first = run_gebco(Some(region()), &[("layer", "tid")]);
        let second = run_gebco(Some(region()), &[("layer", "tid")]);
        assert_eq!(first, second);
        assert_eq!(first.len(), 1);
    }

    #[test]
    fn test_regional_bbox_is_south_west_north_east() {
        let entries = run_gebco(Some(region()), &[]);
        assert!(
            entries[0].url.contains("BBOX=40%2C-10.5%2C50.25%2C5"),
            "unexpected url: {}",
            entries[0].url
        );
    }

    #[test]
    fn test_regional_query_shape() {
        let entries = run_gebco(Some(region()), &[]);
        let url = &entries[0].url;
        assert!(url.starts_with(GEBCO_WCS_URL));
        assert!(url.contains("SERVICE=WCS"));
        assert!(url.contains("VERSION=1.3.0"));
        assert!(url.contains("REQUEST=GetCoverage"));
        assert!(url.contains("CRS=EPSG%3A4326"));
        assert!(url.contains("FORMAT=image%2Ftiff"));
    }

    #[test]
    fn test_layer_grid_resolves_default_coverage() {
        let entries = run_gebco(Some(region()), &[("layer", "grid")]);
        assert!(entries[0].url.contains("COVERAGE=GEBCO_2024_Grid"));
    }

    #[test]
    fn test_unknown_layer_falls_back_to_default_coverage() {
        let entries = run_gebco(Some(region()), &[("layer", "bogus_layer")]);
        assert!(entries[0].url.contains("COVERAGE=GEBCO_2024_Grid"));
    }

    #[test]
    fn test_elevation_is_a_grid_synonym() {
        let entries = run_gebco(Some(region()), &[("layer", "elevation")]);
        assert!(entries[0].url.contains("COVERAGE=GEBCO_2024_Grid"));
        assert!(entries[0].dest_name.starts_with("gebco_grid_"));
    }

    #[test]
    fn test_sub_ice_coverage() {
        let entries = run_gebco(Some(region()), &[("layer", "sub_ice")]);
        assert!(entries[0].url.contains("COVERAGE=GEBCO_2024_Sub_Ice_Topo"));
    }

    #[test]
    fn test_regional_filename_encodes_region() {
        let entries = run_gebco(Some(region()), &[]);
        assert_eq!(entries[0].dest_name, "gebco_grid_wm10p5_e5_s40_n50p25.tif");
        assert_eq!(entries[0].data_type, DataType::Geotiff);
    }

    #[test]
    fn test_no_region_plans_nothing() {
        let entries = run_gebco(None, &[]);
        assert!(entries.is_empty());
    }

    #[test]
    fn test_global_mode_ignores_region_absence() {
        let entries = run_gebco(None, &[("global_grid", "true"), ("layer", "tid")]);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].url, GEBCO_GLOBAL_TID_URL);
        assert_eq!(entries[0].dest_name, "gebco_2024_tid.zip");
        assert_eq!(entries[0].data_type, DataType::Zip);
    }

    #[test]
    fn test_global_mode_unknown_layer_falls_back() {
        let entries = run_gebco(None, &[("global_grid", "1"), ("layer", "mystery")]);
        assert_eq!(entries[0].url, GEBCO_GLOBAL_GRID_URL);
        assert_eq!(entries[0].dest_name, "gebco_2024.zip");
    }

    #[test]
    fn test_run_twice_duplicates_entries() {
        let args = ModuleArgs::new();
        let mut module = Gebco::new(Some(region()), &args);
        module.run().unwrap();
        module.run().unwrap();
        assert_eq!(module.results().len(), 2);
        assert_eq!(module.results()[0], module.results()[1]);
    }
}
