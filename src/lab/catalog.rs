use serde::Serialize;

/// A single feature page in the lab
#[derive(Clone, Debug, Serialize)]
pub struct Feature {
    pub id: &'static str,
    pub name: &'static str,
    pub route: &'static str,
    pub description: &'static str,
}

/// Catalog of all feature pages, in sidebar order
#[derive(Clone, Debug)]
pub struct FeatureCatalog {
    features: Vec<Feature>,
}

impl FeatureCatalog {
    pub fn new() -> Self {
        Self {
            features: vec![
                Feature {
                    id: "home",
                    name: "Home",
                    route: "/",
                    description: "Lab overview and recently visited pages",
                },
                Feature {
                    id: "download",
                    name: "Download",
                    route: "/download",
                    description: "Client-side Blob and anchor-click download triggers with MIME overrides",
                },
                Feature {
                    id: "download-headers",
                    name: "Download Headers",
                    route: "/download-headers",
                    description: "Server downloads with configurable X-Download-Options, Content-Disposition and Content-Type",
                },
                Feature {
                    id: "download-simple",
                    name: "Download Headers (Simple)",
                    route: "/download-simple",
                    description: "One-click downloads with and without X-Download-Options: noopen",
                },
                Feature {
                    id: "download-bubble",
                    name: "Download Bubble Test",
                    route: "/download-bubble",
                    description: "Popup windows that trigger downloads: new window, reused window, auto-download",
                },
                Feature {
                    id: "upload",
                    name: "Upload",
                    route: "/upload",
                    description: "Multipart form and drag-and-drop uploads echoed by the server",
                },
                Feature {
                    id: "plupload",
                    name: "Plupload Demo",
                    route: "/plupload",
                    description: "Third-party upload widget loaded from a CDN",
                },
                Feature {
                    id: "fine-uploader",
                    name: "Fine Uploader Demo",
                    route: "/fine-uploader",
                    description: "Fine Uploader widget with size/item limits and success/fail counters",
                },
            ],
        }
    }

    pub fn all(&self) -> &[Feature] {
        &self.features
    }

    /// Look up a feature by its route
    pub fn find(&self, route: &str) -> Option<&Feature> {
        self.features.iter().find(|f| f.route == route)
    }

    /// Case-insensitive substring match on the display name, catalog order preserved
    pub fn search(&self, query: &str) -> Vec<&Feature> {
        let needle = query.to_lowercase();
        self.features
            .iter()
            .filter(|f| f.name.to_lowercase().contains(&needle))
            .collect()
    }
}

impl Default for FeatureCatalog {
    fn default() -> Self {
        Self::new()
    }
}
