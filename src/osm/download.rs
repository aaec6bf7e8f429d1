use thiserror::Error;

pub const DEFAULT_OVERPASS_URL: &str = "https://overpass-api.de/api/interpreter";
pub const DEFAULT_USER_AGENT: &str = "iran-boundaries";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to the Overpass API failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Overpass API responded with a non-JSON body: {0}")]
    NotJson(#[from] serde_json::Error),
}

/// Anything that can answer an Overpass QL query with a JSON document.
pub trait BoundarySource {
    fn fetch(&self, query: &str) -> Result<serde_json::Value, FetchError>;
}

pub struct OverpassClient {
    client: reqwest::blocking::Client,
    interpreter_url: String,
}

impl OverpassClient {
    pub fn new(interpreter_url: &str, user_agent: &str) -> anyhow::Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            interpreter_url: interpreter_url.to_string(),
        })
    }
}

impl BoundarySource for OverpassClient {
    fn fetch(&self, query: &str) -> Result<serde_json::Value, FetchError> {
        log::debug!("Querying {} with:\n{}", self.interpreter_url, query);
        let response = self
            .client
            .get(&self.interpreter_url)
            .query(&[("data", query)])
            .send()?
            .error_for_status()?;
        let body = response.text()?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// Query for the county relations inside the province with the given
/// ISO 3166-2 code. Member ways and their nodes are fetched as skeletons.
pub fn county_query(province_code: &str, admin_level: u8) -> String {
    format!(
        r#"
[out:json];
area["ISO3166-2"="{province_code}"]->.province;
rel["admin_level"="{admin_level}"](area.province);
out body;
>;
out skel qt;
"#
    )
}

/// Query for every province-level element whose ISO 3166-2 code starts with
/// `country_prefix`, with inline member geometry.
pub fn province_query(country_prefix: &str, admin_level: u8) -> String {
    format!(
        r#"
[out:json];
(
 relation["ISO3166-2"~"^{country_prefix}-"]["admin_level"="{admin_level}"];
 way["ISO3166-2"~"^{country_prefix}-"]["admin_level"="{admin_level}"];
 node["ISO3166-2"~"^{country_prefix}-"]["admin_level"="{admin_level}"];
);
out geom;
"#
    )
}

#[cfg(test)]
mod tests {
    use super::{county_query, province_query};

    #[test]
    fn test_county_query() {
        let query = county_query("IR-07", 5);
        assert!(query.contains(r#"area["ISO3166-2"="IR-07"]->.province;"#));
        assert!(query.contains(r#"rel["admin_level"="5"](area.province);"#));
        assert!(query.trim_end().ends_with("out skel qt;"));
    }

    #[test]
    fn test_province_query() {
        let query = province_query("IR", 4);
        assert!(query.contains(r#"relation["ISO3166-2"~"^IR-"]["admin_level"="4"];"#));
        assert!(query.contains(r#"node["ISO3166-2"~"^IR-"]["admin_level"="4"];"#));
        assert!(query.trim_end().ends_with("out geom;"));
    }
}
