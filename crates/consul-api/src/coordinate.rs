use serde::{Deserialize, Serialize};

/// A network tomography coordinate, Vivaldi style. Useful mostly for
/// estimating round-trip times between nodes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coord {
    #[serde(rename = "Vec", default)]
    pub vec: Vec<f64>,

    #[serde(rename = "Error", default)]
    pub error: f64,

    #[serde(rename = "Adjustment", default)]
    pub adjustment: f64,

    #[serde(rename = "Height", default)]
    pub height: f64,
}

/// LAN coordinate of one node, from `GET /v1/coordinate/nodes`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoordinateEntry {
    #[serde(rename = "Node")]
    pub node: String,

    #[serde(rename = "Coord")]
    pub coord: Coord,
}

/// WAN coordinates of one datacenter's servers, from
/// `GET /v1/coordinate/datacenters`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoordinateDatacenter {
    #[serde(rename = "Datacenter")]
    pub datacenter: String,

    #[serde(rename = "Coordinates", default)]
    pub coordinates: Vec<CoordinateEntry>,

    #[serde(rename = "AreaID", default)]
    pub area_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn datacenter_coordinates_deserialize() {
        let json = r#"[{
            "Datacenter": "dc1",
            "AreaID": "WAN",
            "Coordinates": [{
                "Node": "agent-one",
                "Coord": {
                    "Adjustment": 0,
                    "Error": 1.5,
                    "Height": 0,
                    "Vec": [0, 0, 0, 0, 0, 0, 0, 0]
                }
            }]
        }]"#;

        let dcs: Vec<CoordinateDatacenter> = serde_json::from_str(json).unwrap();
        assert_eq!(dcs[0].datacenter, "dc1");
        assert_eq!(dcs[0].coordinates[0].coord.vec.len(), 8);
    }
}
