use std::collections::BTreeMap;

/// Arguments for one generator invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub input_url: String,
    pub generator: String,
    /// Output path as seen from inside the generator container
    pub output_dir: String,
    /// Config file path as seen from inside the generator container
    pub config_file: String,
    pub additional_properties: BTreeMap<String, String>,
}

impl GenerationRequest {
    pub fn to_args(&self) -> Vec<String> {
        let mut args: Vec<String> = vec![
            "generate".into(),
            "-i".into(),
            self.input_url.clone(),
            "-g".into(),
            self.generator.clone(),
            "-o".into(),
            self.output_dir.clone(),
            "-c".into(),
            self.config_file.clone(),
        ];

        if !self.additional_properties.is_empty() {
            let props = self
                .additional_properties
                .iter()
                .map(|(k, v)| format!("{k}={v}"))
                .collect::<Vec<_>>()
                .join(",");
            args.push("--additional-properties".into());
            args.push(props);
        }

        args
    }
}
