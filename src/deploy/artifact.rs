//! Compiled contract artifacts
//!
//! Reads the JSON files Hardhat writes under `artifacts/`: the per-contract
//! artifact (bytecode) and the build-info (compiler input for verification).

use alloy_primitives::Bytes;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::error::ArtifactError;

/// A compiled contract
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractArtifact {
    pub contract_name: String,
    pub source_name: String,
    /// Creation bytecode as `0x` hex
    pub bytecode: String,
    #[serde(default)]
    pub abi: serde_json::Value,
}

impl ContractArtifact {
    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        read_json(path)
    }

    /// Decoded creation bytecode
    pub fn creation_code(&self) -> Result<Bytes, ArtifactError> {
        let code: Bytes = self
            .bytecode
            .trim()
            .parse()
            .map_err(|e| ArtifactError::InvalidBytecode {
                contract: self.contract_name.clone(),
                error: format!("{}", e),
            })?;

        if code.is_empty() {
            return Err(ArtifactError::EmptyBytecode(self.contract_name.clone()));
        }
        Ok(code)
    }

    /// `source:Name`, the form explorers expect
    pub fn qualified_name(&self) -> String {
        format!("{}:{}", self.source_name, self.contract_name)
    }
}

/// The `<Name>.dbg.json` Hardhat writes next to each artifact
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DebugFile {
    /// Build-info path relative to the debug file's directory
    build_info: String,
}

/// Compiler input and version of one Hardhat build
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildInfo {
    /// e.g. `0.8.25+commit.b61c2a91`
    pub solc_long_version: String,
    /// Standard JSON input given to solc
    pub input: serde_json::Value,
}

impl BuildInfo {
    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        read_json(path)
    }

    /// Find the build-info of the artifact at `artifact_path` through the
    /// `<Name>.dbg.json` file beside it
    pub fn locate(artifact_path: &Path) -> Result<PathBuf, ArtifactError> {
        let dbg_path = artifact_path.with_extension("dbg.json");
        let debug: DebugFile = read_json(&dbg_path)?;

        let dir = artifact_path.parent().unwrap_or_else(|| Path::new(""));
        Ok(dir.join(debug.build_info))
    }

    /// Version string in explorer format, e.g. `v0.8.25+commit.b61c2a91`
    pub fn compiler_version(&self) -> String {
        format!("v{}", self.solc_long_version.trim_start_matches('v'))
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let content = std::fs::read_to_string(path).map_err(|e| ArtifactError::Io {
        path: path.to_path_buf(),
        error: e.to_string(),
    })?;

    serde_json::from_str(&content).map_err(|e| ArtifactError::Parse {
        path: path.to_path_buf(),
        error: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_artifact() {
        let file = write_temp(
            r#"{
                "_format": "hh-sol-artifact-1",
                "contractName": "PHRRegistry",
                "sourceName": "contracts/PHRRegistry.sol",
                "abi": [],
                "bytecode": "0x6080604052",
                "deployedBytecode": "0x6080"
            }"#,
        );

        let artifact = ContractArtifact::load(file.path()).unwrap();
        assert_eq!(artifact.contract_name, "PHRRegistry");
        assert_eq!(artifact.qualified_name(), "contracts/PHRRegistry.sol:PHRRegistry");
        assert_eq!(
            artifact.creation_code().unwrap().to_vec(),
            vec![0x60, 0x80, 0x60, 0x40, 0x52]
        );
    }

    #[test]
    fn test_empty_bytecode() {
        let artifact = ContractArtifact {
            contract_name: "IRegistry".into(),
            source_name: "contracts/IRegistry.sol".into(),
            bytecode: "0x".into(),
            abi: serde_json::Value::Null,
        };
        assert!(matches!(
            artifact.creation_code(),
            Err(ArtifactError::EmptyBytecode(_))
        ));
    }

    #[test]
    fn test_invalid_bytecode() {
        let artifact = ContractArtifact {
            contract_name: "PHRRegistry".into(),
            source_name: "contracts/PHRRegistry.sol".into(),
            bytecode: "0xzz".into(),
            abi: serde_json::Value::Null,
        };
        assert!(matches!(
            artifact.creation_code(),
            Err(ArtifactError::InvalidBytecode { .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = ContractArtifact::load(Path::new("/nonexistent/PHRRegistry.json")).unwrap_err();
        assert!(matches!(err, ArtifactError::Io { .. }));
    }

    #[test]
    fn test_build_info() {
        let file = write_temp(
            r#"{"solcVersion":"0.8.25","solcLongVersion":"0.8.25+commit.b61c2a91","input":{"language":"Solidity","sources":{}}}"#,
        );
        let info = BuildInfo::load(file.path()).unwrap();
        assert_eq!(info.compiler_version(), "v0.8.25+commit.b61c2a91");
        assert_eq!(info.input["language"], "Solidity");
    }

    /// Lay out `artifacts/` the way Hardhat does and return the artifact path
    fn hardhat_tree(root: &Path) -> PathBuf {
        let contract_dir = root.join("artifacts/contracts/PHRRegistry.sol");
        let build_info_dir = root.join("artifacts/build-info");
        std::fs::create_dir_all(&contract_dir).unwrap();
        std::fs::create_dir_all(&build_info_dir).unwrap();

        let artifact = contract_dir.join("PHRRegistry.json");
        std::fs::write(
            &artifact,
            r#"{"contractName":"PHRRegistry","sourceName":"contracts/PHRRegistry.sol","bytecode":"0x6080"}"#,
        )
        .unwrap();
        std::fs::write(
            contract_dir.join("PHRRegistry.dbg.json"),
            r#"{"_format":"hh-sol-dbg-1","buildInfo":"../../build-info/5f3c9a.json"}"#,
        )
        .unwrap();
        std::fs::write(
            build_info_dir.join("5f3c9a.json"),
            r#"{"solcLongVersion":"0.8.25+commit.b61c2a91","input":{"language":"Solidity"}}"#,
        )
        .unwrap();
        artifact
    }

    #[test]
    fn test_locate_build_info_from_debug_file() {
        let dir = tempfile::tempdir().unwrap();
        let artifact = hardhat_tree(dir.path());

        let path = BuildInfo::locate(&artifact).unwrap();
        assert!(path.ends_with("build-info/5f3c9a.json"));

        let info = BuildInfo::load(&path).unwrap();
        assert_eq!(info.compiler_version(), "v0.8.25+commit.b61c2a91");
    }

    #[test]
    fn test_locate_without_debug_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = BuildInfo::locate(&dir.path().join("PHRRegistry.json")).unwrap_err();
        assert!(matches!(err, ArtifactError::Io { .. }));
    }
}
