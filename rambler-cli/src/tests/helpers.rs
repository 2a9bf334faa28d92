//! Fixtures writing datasets and requests to a temporary workspace.

use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

pub(super) const CITY_GUIDE_CSV: &str = "\
name,type,avg_cost,short_description,lat,lng,distance_km,open_hour,weather,travel_type,country,state,city
Cubbon Park,park,₹20,Green lung,12.9763,77.5929,2,6,sunny,family,India,Karnataka,Bengaluru
Lalbagh,park,₹30,Glasshouse gardens,12.9507,77.5848,4,6,sunny,solo,India,Karnataka,Bengaluru
Visvesvaraya Museum,museum,₹75,Science galleries,12.9752,77.5963,3,10,rainy,family,India,Karnataka,Bengaluru
Mysore Palace,palace,₹100,Royal residence,12.3051,76.6551,145,10,sunny,family,India,Karnataka,Mysuru
";

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path, contents).expect("write fixture file");
}

/// A temporary directory holding a dataset and an optional request.
#[derive(Debug)]
pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    pub(super) fn with_city_guide() -> Self {
        let workspace = Self::new();
        write_utf8(&workspace.dataset(), CITY_GUIDE_CSV.as_bytes());
        workspace
    }

    pub(super) fn root(&self) -> &Utf8Path {
        &self.root
    }

    pub(super) fn dataset(&self) -> Utf8PathBuf {
        self.root.join("places.csv")
    }

    pub(super) fn request(&self) -> Utf8PathBuf {
        self.root.join("request.json")
    }

    pub(super) fn model(&self) -> Utf8PathBuf {
        self.root.join("models/best_match.bin")
    }

    pub(super) fn write_request(&self, body: &str) -> Utf8PathBuf {
        let path = self.request();
        write_utf8(&path, body.as_bytes());
        path
    }
}
