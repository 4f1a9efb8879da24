//! Behaviour-driven step definitions driving the raster CLI scenarios.

use super::helpers::{StubMapLoader, run_captured, scratch_dir, write_utf8};
use super::*;
use bearmaps_core::RasterResponse;
use bearmaps_core::raster::{ROOT_LOWER_RIGHT, ROOT_UPPER_LEFT};
use camino::Utf8PathBuf;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;
use tempfile::TempDir;

#[derive(Debug)]
struct RasterWorld {
    _tmp: TempDir,
    request_path: Utf8PathBuf,
    stdout: RefCell<Vec<u8>>,
    result: RefCell<Option<Result<(), CliError>>>,
}

impl RasterWorld {
    fn new() -> Self {
        let (tmp, root) = scratch_dir();
        Self {
            _tmp: tmp,
            request_path: root.join("request.json"),
            stdout: RefCell::new(Vec::new()),
            result: RefCell::new(None),
        }
    }

    fn run(&self, args: &[String]) {
        let mut argv = vec![String::from("bearmaps"), String::from("raster")];
        argv.extend_from_slice(args);
        let mut buffer = self.stdout.borrow_mut();
        let outcome = run_captured(&argv, &StubMapLoader, &mut buffer);
        self.result.replace(Some(outcome));
    }

    fn response(&self) -> RasterResponse {
        let borrowed = self.result.borrow();
        let result = borrowed.as_ref().expect("result recorded");
        result.as_ref().expect("expected success");
        serde_json::from_slice(&self.stdout.borrow()).expect("output should be a raster response")
    }

    fn error(&self, check: impl FnOnce(&CliError)) {
        let borrowed = self.result.borrow();
        let error = borrowed
            .as_ref()
            .expect("result recorded")
            .as_ref()
            .expect_err("expected error");
        check(error);
    }
}

fn flag(name: &str, value: f64) -> [String; 2] {
    [format!("--{name}"), value.to_string()]
}

#[fixture]
fn world() -> RasterWorld {
    RasterWorld::new()
}

#[given("a raster request file for a viewport east of the map")]
fn east_request_file(#[from(world)] world: &RasterWorld) {
    write_utf8(
        &world.request_path,
        br#"{"ullon": -122.1, "ullat": 37.86, "lrlon": -122.0, "lrlat": 37.84, "w": 512, "h": 512}"#,
    );
}

#[given("a raster request file containing invalid JSON")]
fn invalid_request_file(#[from(world)] world: &RasterWorld) {
    write_utf8(&world.request_path, b"{ not valid json");
}

#[when("I run raster with the whole-map viewport flags")]
fn run_whole_map(#[from(world)] world: &RasterWorld) {
    let args: Vec<String> = [
        flag(ARG_ULLON, ROOT_UPPER_LEFT.x),
        flag(ARG_ULLAT, ROOT_UPPER_LEFT.y),
        flag(ARG_LRLON, ROOT_LOWER_RIGHT.x),
        flag(ARG_LRLAT, ROOT_LOWER_RIGHT.y),
        flag(ARG_WIDTH, 128.0),
        flag(ARG_HEIGHT, 128.0),
    ]
    .into_iter()
    .flatten()
    .collect();
    world.run(&args);
}

#[when("I run raster with the request file")]
fn run_with_request_file(#[from(world)] world: &RasterWorld) {
    let args = [format!("--{ARG_REQUEST}"), world.request_path.to_string()];
    world.run(&args);
}

#[when("I run raster without a height")]
fn run_without_height(#[from(world)] world: &RasterWorld) {
    let args: Vec<String> = [
        flag(ARG_ULLON, -122.26),
        flag(ARG_ULLAT, 37.87),
        flag(ARG_LRLON, -122.25),
        flag(ARG_LRLAT, 37.86),
        flag(ARG_WIDTH, 512.0),
    ]
    .into_iter()
    .flatten()
    .collect();
    world.run(&args);
}

#[then("the command prints a successful response at depth 0")]
fn prints_root_tile(#[from(world)] world: &RasterWorld) {
    let response = world.response();
    assert!(response.query_success);
    assert_eq!(response.depth, 0);
    assert_eq!(response.render_grid, vec![vec![String::from("d0_x0_y0.png")]]);
}

#[then("the command prints a failed query response")]
fn prints_failure(#[from(world)] world: &RasterWorld) {
    assert!(!world.response().query_success);
}

#[then("the command fails because the height is missing")]
fn fails_missing_height(#[from(world)] world: &RasterWorld) {
    world.error(|error| match error {
        CliError::MissingArgument { field, env } => {
            assert_eq!(*field, ARG_HEIGHT);
            assert_eq!(*env, ENV_RASTER_HEIGHT);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    });
}

#[then("the command fails because the request JSON is invalid")]
fn fails_invalid_json(#[from(world)] world: &RasterWorld) {
    world.error(|error| match error {
        CliError::ParseRequest { .. } => {}
        other => panic!("expected ParseRequest, found {other:?}"),
    });
}

macro_rules! register_raster_scenario {
    ($fn_name:ident, $scenario_title:literal) => {
        #[scenario(path = "tests/features/raster_command.feature", name = $scenario_title)]
        fn $fn_name(#[from(world)] world: RasterWorld) {
            let _ = world;
        }
    };
}

register_raster_scenario!(raster_from_flags, "rastering a viewport from flags");
register_raster_scenario!(raster_from_file, "rastering from a request file");
register_raster_scenario!(raster_incomplete, "rejecting incomplete viewports");
register_raster_scenario!(raster_invalid_json, "rejecting malformed request files");
