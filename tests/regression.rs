use gridsweeper::{outline, Cell, CellSet, Error, Options, Point, PolygonWithHoles, Ring};
use libtest_mimic::{Arguments, Failed, Trial};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Serialize, Deserialize, Debug)]
enum ExpectedError {
    InvalidScale,
}

#[derive(Serialize, Deserialize, Debug, Default)]
struct Expected {
    /// The hole cells, in the order they're emitted.
    #[serde(default)]
    holes: Vec<Cell>,
    /// The number of outer rings.
    #[serde(default)]
    outer: usize,
    /// The area enclosed by the outer rings, in output units.
    #[serde(default)]
    area: i64,
    /// The exact outer rings, as `[x, y]` corners in output units.
    outer_rings: Option<Vec<Vec<(i64, i64)>>>,
    error: Option<ExpectedError>,
}

#[derive(Serialize, Deserialize, Debug)]
struct RegressionCaseDeclaration {
    #[serde(flatten)]
    options: Options,
    cells: CellSet,
    expect: Expected,
}

fn main() {
    let args = Arguments::from_args();
    let tests = regression_tests();

    libtest_mimic::run(&args, tests).exit();
}

fn regression_tests() -> Vec<Trial> {
    let ws = std::env::var("CARGO_MANIFEST_DIR").unwrap();
    let file_paths = glob::glob(&format!("{ws}/tests/regression/**/*.toml")).unwrap();

    file_paths
        .into_iter()
        .map(|p| {
            let p = p.unwrap();
            let name = input_path_base(&p).display().to_string();
            Trial::test(name, || run_regression_test(p))
        })
        .collect()
}

fn input_path_base(input_path: &Path) -> &Path {
    let ws = std::env::var("CARGO_MANIFEST_DIR").unwrap();
    let base = format!("{ws}/tests/regression");
    input_path.strip_prefix(base).unwrap()
}

fn run_regression_test(path: PathBuf) -> Result<(), Failed> {
    let input = std::fs::read_to_string(&path).unwrap();
    let case: RegressionCaseDeclaration = toml::from_str(&input).map_err(|e| e.to_string())?;
    let result = outline(&case.cells, &case.options);

    match (&case.expect.error, result) {
        (Some(ExpectedError::InvalidScale), Err(Error::InvalidScale(_))) => Ok(()),
        (Some(expected), result) => Err(format!("expected {expected:?}, got {result:?}").into()),
        (None, Err(e)) => Err(format!("unexpected error: {e}").into()),
        (None, Ok(out)) => check_outline(&case, &out),
    }
}

fn check_outline(case: &RegressionCaseDeclaration, out: &PolygonWithHoles) -> Result<(), Failed> {
    let scale = case.options.scale;
    let expected_holes: Vec<_> = case
        .expect
        .holes
        .iter()
        .map(|c| c.ring().scaled(gridsweeper::Scale::new(scale).unwrap()).unwrap())
        .collect();
    if out.holes != expected_holes {
        return Err(format!(
            "hole mismatch: expected {:?}, got {:?}",
            expected_holes, out.holes
        )
        .into());
    }

    if out.outer.len() != case.expect.outer {
        return Err(format!(
            "expected {} outer rings, got {}",
            case.expect.outer,
            out.outer.len()
        )
        .into());
    }

    let area: i128 = out.outer.iter().map(|r| r.signed_area2() / 2).sum();
    if area != i128::from(case.expect.area) {
        return Err(format!("expected area {}, got {area}", case.expect.area).into());
    }

    if out.outer.iter().any(|r| !r.is_counter_clockwise()) {
        return Err("outer ring with the wrong orientation".into());
    }

    if let Some(rings) = &case.expect.outer_rings {
        let expected: Vec<Ring> = rings
            .iter()
            .map(|r| r.iter().map(|&(x, y)| Point::new(x, y)).collect())
            .collect();
        if out.outer != expected {
            return Err(format!(
                "outer ring mismatch: expected {:?}, got {:?}",
                expected, out.outer
            )
            .into());
        }
    }
    Ok(())
}
