//! Tabular rendering of service results for the command line.

use crate::domain::results::{
    FacilityAnalyst3DResult, GenerateSpatialDataResult, GetFeaturesResult, LayersInfo,
    ResourceResult, ServerFeature,
};
use crate::utils::error::Result;
use std::io::Write;

/// A result that can be flattened into CSV rows.
pub trait CsvTable {
    fn header(&self) -> Vec<String>;
    fn rows(&self) -> Vec<Vec<String>>;
}

pub fn write_csv<T: CsvTable, W: Write>(table: &T, writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(table.header())?;
    for row in table.rows() {
        csv_writer.write_record(&row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn write_json<T: serde::Serialize, W: Write>(value: &T, mut writer: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, value)?;
    writeln!(writer)?;
    Ok(())
}

/// `ID` followed by every field name in order of first appearance.
fn feature_header(features: &[ServerFeature]) -> Vec<String> {
    let mut header = vec!["ID".to_string()];
    for feature in features {
        for name in &feature.field_names {
            if !header.contains(name) {
                header.push(name.clone());
            }
        }
    }
    header
}

fn feature_rows(features: &[ServerFeature], header: &[String]) -> Vec<Vec<String>> {
    features
        .iter()
        .map(|feature| {
            let mut row = vec![feature.id.to_string()];
            row.extend(header.iter().skip(1).map(|name| {
                feature
                    .attributes()
                    .find(|(field, _)| *field == name.as_str())
                    .map(|(_, value)| value.to_string())
                    .unwrap_or_default()
            }));
            row
        })
        .collect()
}

impl CsvTable for GetFeaturesResult {
    fn header(&self) -> Vec<String> {
        feature_header(&self.features)
    }

    fn rows(&self) -> Vec<Vec<String>> {
        feature_rows(&self.features, &self.header())
    }
}

impl CsvTable for GenerateSpatialDataResult {
    fn header(&self) -> Vec<String> {
        match &self.recordset {
            Some(recordset) => feature_header(&recordset.features),
            None => vec!["succeed".to_string(), "dataset".to_string()],
        }
    }

    fn rows(&self) -> Vec<Vec<String>> {
        match &self.recordset {
            Some(recordset) => feature_rows(&recordset.features, &self.header()),
            None => vec![vec![
                self.succeed.to_string(),
                self.dataset.clone().unwrap_or_default(),
            ]],
        }
    }
}

impl CsvTable for FacilityAnalyst3DResult {
    fn header(&self) -> Vec<String> {
        vec!["element".to_string(), "id".to_string()]
    }

    fn rows(&self) -> Vec<Vec<String>> {
        let edges = self
            .edge_ids
            .iter()
            .map(|id| vec!["edge".to_string(), id.to_string()]);
        let nodes = self
            .node_ids
            .iter()
            .map(|id| vec!["node".to_string(), id.to_string()]);
        edges.chain(nodes).collect()
    }
}

impl CsvTable for ResourceResult {
    fn header(&self) -> Vec<String> {
        ["succeed", "newResourceID", "newResourceLocation"]
            .map(String::from)
            .to_vec()
    }

    fn rows(&self) -> Vec<Vec<String>> {
        vec![vec![
            self.succeed.to_string(),
            self.new_resource_id.clone().unwrap_or_default(),
            self.new_resource_location.clone().unwrap_or_default(),
        ]]
    }
}

/// One row per layer and one per sub-layer; `parent` is empty for top-level layers.
impl CsvTable for LayersInfo {
    fn header(&self) -> Vec<String> {
        ["parent", "name", "type", "visible"].map(String::from).to_vec()
    }

    fn rows(&self) -> Vec<Vec<String>> {
        let mut rows = Vec::new();
        for layer in self {
            let name = layer.name.clone().unwrap_or_default();
            rows.push(vec![
                String::new(),
                name.clone(),
                layer.layer_type.clone().unwrap_or_default(),
                layer.visible.map(|v| v.to_string()).unwrap_or_default(),
            ]);
            for sub_layer in &layer.sub_layers.layers {
                rows.push(vec![
                    name.clone(),
                    sub_layer.name.clone().unwrap_or_default(),
                    sub_layer
                        .ugc_layer_type
                        .map(|t| t.as_str().to_string())
                        .unwrap_or_default(),
                    sub_layer.visible.map(|v| v.to_string()).unwrap_or_default(),
                ]);
            }
        }
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn render<T: CsvTable>(table: &T) -> String {
        let mut buffer = Vec::new();
        write_csv(table, &mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_features_csv() {
        let result: GetFeaturesResult = serde_json::from_value(json!({
            "featureCount": 2,
            "totalCount": 2,
            "features": [
                {"ID": 1, "fieldNames": ["SMID", "NAME"], "fieldValues": ["1", "China"]},
                {"ID": 2, "fieldNames": ["SMID", "NAME", "POP"], "fieldValues": ["2", "Chile, Republic of", "19"]}
            ]
        }))
        .unwrap();

        assert_eq!(
            render(&result),
            "ID,SMID,NAME,POP\n1,1,China,\n2,2,\"Chile, Republic of\",19\n"
        );
    }

    #[test]
    fn test_facility_csv() {
        let result = FacilityAnalyst3DResult {
            edge_ids: vec![10, 11],
            node_ids: vec![3],
            ..FacilityAnalyst3DResult::default()
        };
        assert_eq!(render(&result), "element,id\nedge,10\nedge,11\nnode,3\n");
    }

    #[test]
    fn test_layers_csv() {
        let layers: LayersInfo = serde_json::from_value(json!([{
            "name": "World",
            "type": "UGC",
            "visible": true,
            "subLayers": {"layers": [{"name": "Rivers@World", "ugcLayerType": "VECTOR", "visible": false}]}
        }]))
        .unwrap();

        assert_eq!(
            render(&layers),
            "parent,name,type,visible\n,World,UGC,true\nWorld,Rivers@World,VECTOR,false\n"
        );
    }
}
