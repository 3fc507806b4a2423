pub mod config;
pub mod dotnet_pack;
pub mod engine_adapter;
pub mod http_probe;
pub mod output_dirs;

pub use dotnet_pack::DotnetPackTool;
pub use engine_adapter::EngineAdapter;
pub use http_probe::ReqwestProbe;
