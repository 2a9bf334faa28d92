#![expect(
    clippy::expect_used,
    reason = "tests should fail fast when setup breaks"
)]

//! Behavioural coverage for end-to-end recommendations.

use std::cell::RefCell;

use camino::Utf8PathBuf;
use rambler_core::{NumericInput, RecommendationRequest};
use rambler_scorer::{RecommendError, RecommendResponse, Recommender};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tempfile::TempDir;

/// State shared by the steps of one scenario.
pub struct TestContext {
    temp_dir: TempDir,
    dataset_path: RefCell<Option<Utf8PathBuf>>,
    response: RefCell<Option<RecommendResponse>>,
    startup: RefCell<Option<Result<Recommender, RecommendError>>>,
}

#[fixture]
/// Build a fresh `TestContext` for each scenario run.
pub fn context() -> TestContext {
    TestContext {
        temp_dir: TempDir::new().expect("create tempdir for scenario"),
        dataset_path: RefCell::new(None),
        response: RefCell::new(None),
        startup: RefCell::new(None),
    }
}

fn write_dataset(context: &TestContext, contents: &str) {
    let path = Utf8PathBuf::from_path_buf(context.temp_dir.path().join("places.csv"))
        .expect("utf-8 dataset path");
    std::fs::write(&path, contents).expect("write dataset");
    *context.dataset_path.borrow_mut() = Some(path);
}

fn ask(context: &TestContext, request: &RecommendationRequest) {
    let path = context
        .dataset_path
        .borrow()
        .clone()
        .expect("dataset written");
    let recommender = Recommender::from_path(&path).expect("dataset loads");
    let response = recommender.recommend(request).expect("valid request");
    *context.response.borrow_mut() = Some(response);
}

fn with_response<T>(context: &TestContext, inspect: impl FnOnce(&RecommendResponse) -> T) -> T {
    let response = context.response.borrow();
    inspect(response.as_ref().expect("recommendation made"))
}

#[given("a dataset with three parks and a museum")]
fn parks_dataset(context: &TestContext) {
    write_dataset(
        context,
        "name,type,avg_cost,distance_km,open_hour,weather,travel_type,short_description,country\n\
         Cubbon Park,park,₹0,2,6,sunny,family,Shaded lawns,India\n\
         Lalbagh,park,₹25,5,6,sunny,solo,Botanical garden,India\n\
         Freedom Park,park,₹10,1,9,rainy,family,Open-air memorial,India\n\
         Science Museum,museum,₹80,3,10,rainy,family,Hands-on exhibits,India\n",
    );
}

#[given("a dataset with coordinates")]
fn coordinates_dataset(context: &TestContext) {
    write_dataset(
        context,
        "name,type,avg_cost,short_description,lat,lng,country,state,city\n\
         Bangalore Palace,palace,230,Tudor-style palace,12.9987,77.5920,India,Karnataka,Bengaluru\n\
         Tipu Sultan Fort,fort,0,Teak fort,12.9593,77.5737,India,Karnataka,Bengaluru\n\
         Ulsoor Lake,lake,0,Boating lake,12.9817,77.6186,India,Karnataka,Bengaluru\n",
    );
}

#[given("a dataset path that does not exist")]
fn missing_dataset(context: &TestContext) {
    let path = Utf8PathBuf::from_path_buf(context.temp_dir.path().join("missing.csv"))
        .expect("utf-8 dataset path");
    *context.dataset_path.borrow_mut() = Some(path);
}

#[when("I ask for two parks costing about 10")]
fn ask_for_parks(context: &TestContext) {
    let request = RecommendationRequest {
        kind: Some("park".to_owned()),
        avg_cost: Some(NumericInput::Number(10.0)),
        open_hour: Some(NumericInput::Number(9.0)),
        top_k: Some(2),
        ..RecommendationRequest::default()
    };
    ask(context, &request);
}

#[when("I ask for places in Nowhereland")]
fn ask_nowhere(context: &TestContext) {
    let request = RecommendationRequest {
        country: Some("Nowhereland".to_owned()),
        ..RecommendationRequest::default()
    };
    ask(context, &request);
}

#[when("I ask from the position of the fort")]
fn ask_from_fort(context: &TestContext) {
    let request = RecommendationRequest {
        user_lat: Some(NumericInput::Number(12.9593)),
        user_lng: Some(NumericInput::from("77.5737")),
        ..RecommendationRequest::default()
    };
    ask(context, &request);
}

#[when("the recommender starts")]
fn start(context: &TestContext) {
    let path = context
        .dataset_path
        .borrow()
        .clone()
        .expect("dataset path chosen");
    *context.startup.borrow_mut() = Some(Recommender::from_path(&path));
}

#[then("two parks are returned")]
fn two_parks(context: &TestContext) {
    with_response(context, |response| {
        assert_eq!(response.results.len(), 2);
        assert!(response.results.iter().all(|record| record.kind == "park"));
    });
}

#[then("the results are in descending score order")]
fn descending(context: &TestContext) {
    with_response(context, |response| {
        let names: Vec<&str> = response
            .results
            .iter()
            .map(|record| record.name.as_str())
            .collect();
        assert_eq!(names, ["Freedom Park", "Cubbon Park"]);
        assert!(response.results.windows(2).all(|pair| match pair {
            [first, second] => first.score >= second.score,
            _ => true,
        }));
    });
}

#[then("no results are returned")]
fn no_results(context: &TestContext) {
    with_response(context, |response| {
        assert!(response.results.is_empty());
        assert!(response.best_match.is_none());
    });
}

#[then("the fort is the best result")]
fn fort_first(context: &TestContext) {
    with_response(context, |response| {
        let first = response.results.first().expect("at least one result");
        assert_eq!(first.name, "Tipu Sultan Fort");
        assert_eq!(first.real_distance, Some(0.0));
    });
}

#[then("the fort scores zero")]
fn fort_scores_zero(context: &TestContext) {
    with_response(context, |response| {
        let first = response.results.first().expect("at least one result");
        assert_eq!(first.score, 0.0);
    });
}

#[then("the dataset is reported unavailable")]
fn unavailable(context: &TestContext) {
    let startup = context.startup.borrow();
    let outcome = startup.as_ref().expect("startup attempted");
    assert!(matches!(outcome, Err(RecommendError::DatasetUnavailable(_))));
}

#[scenario(path = "tests/features/recommend.feature", index = 0)]
fn parks_ranked_by_score(context: TestContext) {
    let _ = context;
}

#[scenario(path = "tests/features/recommend.feature", index = 1)]
fn unknown_country_is_empty(context: TestContext) {
    let _ = context;
}

#[scenario(path = "tests/features/recommend.feature", index = 2)]
fn coincident_position_scores_zero(context: TestContext) {
    let _ = context;
}

#[scenario(path = "tests/features/recommend.feature", index = 3)]
fn missing_dataset_is_unavailable(context: TestContext) {
    let _ = context;
}
