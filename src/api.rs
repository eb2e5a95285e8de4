use crate::config::SolverConfig;
use crate::solver::{self, SolverResult};
use crate::timing::Stopwatch;
use crate::Tile;
use serde::{Deserialize, Serialize};

/// A tile in a request: compact notation ("r5", "w") or a full tile object
#[derive(Deserialize)]
#[serde(untagged)]
pub enum TileJson {
    Compact(String),
    Full(Tile),
}

impl TileJson {
    fn into_tile(self) -> Result<Tile, String> {
        match self {
            TileJson::Compact(s) => Tile::from_string(&s),
            TileJson::Full(mut tile) => {
                if tile.label.is_empty() {
                    tile.label = Tile::new(String::new(), tile.suit, tile.number).label;
                }
                Ok(tile)
            }
        }
    }
}

/// JSON request: `{"hand": [...], "table": [...], "config": {...}}`
#[derive(Deserialize)]
pub struct SolveRequest {
    #[serde(default)]
    pub hand: Vec<TileJson>,
    #[serde(default)]
    pub table: Vec<TileJson>,
    #[serde(default)]
    pub config: SolverConfig,
}

/// JSON response wrapping a result or an error
#[derive(Serialize, Deserialize)]
pub struct SolveResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<SolverResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Wall-clock time spent parsing and solving
    pub elapsed_ms: f64,
}

/// Solve a JSON request and return a JSON response.
///
/// Never fails: malformed requests and invalid configurations come back as
/// `{"success": false, "error": ...}`.
pub fn solve_request(request: &str) -> String {
    let watch = Stopwatch::start();
    let response = match solve_internal(request) {
        Ok(result) => SolveResponse {
            success: true,
            result: Some(result),
            error: None,
            elapsed_ms: watch.elapsed_ms(),
        },
        Err(e) => SolveResponse {
            success: false,
            result: None,
            error: Some(e),
            elapsed_ms: watch.elapsed_ms(),
        },
    };

    serde_json::to_string(&response)
        .unwrap_or_else(|e| format!(r#"{{"success":false,"error":"Serialization error: {}"}}"#, e))
}

fn solve_internal(request: &str) -> Result<SolverResult, String> {
    let request: SolveRequest =
        serde_json::from_str(request).map_err(|e| format!("Invalid request JSON: {}", e))?;

    let hand = parse_tile_list(request.hand)?;
    let table = parse_tile_list(request.table)?;

    solver::solve(&hand, &table, &request.config).map_err(|e| format!("Invalid config: {}", e))
}

fn parse_tile_list(tiles: Vec<TileJson>) -> Result<Vec<Tile>, String> {
    tiles.into_iter().map(TileJson::into_tile).collect()
}
