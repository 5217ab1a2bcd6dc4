//! Example records loaded into a fresh node.

use serde_json::json;

use crate::storage::record::Record;

pub fn example_records() -> Vec<Record> {
    vec![
        Record::from_json(
            "datacenter-1",
            json!({
                "monitoring": { "enabled": "true" },
                "limits": {
                    "cpu": { "enabled": "true", "value": "250m" }
                }
            }),
        ),
        Record::from_json(
            "datacenter-2",
            json!({
                "monitoring": { "enabled": "false" },
                "limits": {
                    "cpu": { "enabled": "true", "value": "260m" }
                }
            }),
        ),
        Record::from_json(
            "burger-nutrition",
            json!({
                "calories": 230,
                "fats": { "enabled": "false" },
                "carbohydrates": { "dietary-fiber": "4g", "sugars": "1g" },
                "allergens": { "nuts": "false", "seafood": "false", "eggs": "true" }
            }),
        ),
    ]
}
