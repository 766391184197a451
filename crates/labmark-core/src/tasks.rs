//! The six task scorers.
//!
//! Each scorer is a pure function from the submission sources to a
//! [`TaskResult`]: it evaluates a fixed set of [`signals`] over the relevant
//! text blob, assigns completeness / correctness / quality points, and
//! records an evidence line for every branch taken. Scorers never fail;
//! absent patterns simply earn nothing.
//!
//! The evidence strings are part of the product surface (students read them
//! in CI), so tests assert them verbatim.

use crate::model::{CategoryCaps, TaskResult, TASK_COUNT};
use crate::signals;
use crate::sources::Sources;

/// Category ceilings for tasks 1 through 5 (max 14 each).
pub const STANDARD_CAPS: CategoryCaps = CategoryCaps {
    completeness: 5,
    correctness: 5,
    quality: 4,
};

/// Category ceilings for task 6 (max 10).
pub const FINAL_CAPS: CategoryCaps = CategoryCaps {
    completeness: 4,
    correctness: 3,
    quality: 3,
};

/// One row of the fixed rubric.
#[derive(Debug, Clone, Copy)]
pub struct TaskSpec {
    pub id: u8,
    pub label: &'static str,
    pub caps: CategoryCaps,
}

/// The fixed rubric, in task order.
pub const RUBRIC: [TaskSpec; TASK_COUNT] = [
    TaskSpec {
        id: 1,
        label: "TODO 1 – MongoDB connection logic",
        caps: STANDARD_CAPS,
    },
    TaskSpec {
        id: 2,
        label: "TODO 2 – Song schema & model (\"Song\")",
        caps: STANDARD_CAPS,
    },
    TaskSpec {
        id: 3,
        label: "TODO 3 – POST /api/songs (create)",
        caps: STANDARD_CAPS,
    },
    TaskSpec {
        id: 4,
        label: "TODO 4 – GET /api/songs & GET /api/songs/:id",
        caps: STANDARD_CAPS,
    },
    TaskSpec {
        id: 5,
        label: "TODO 5 – PUT /api/songs/:id (update)",
        caps: STANDARD_CAPS,
    },
    TaskSpec {
        id: 6,
        label: "TODO 6 – DELETE /api/songs/:id (delete)",
        caps: FINAL_CAPS,
    },
];

/// Run all six scorers, in task order.
pub fn grade_all(sources: &Sources) -> Vec<TaskResult> {
    vec![
        db_connection(sources),
        song_model(sources),
        create_route(sources),
        read_routes(sources),
        update_route(sources),
        delete_route(sources),
    ]
}

/// Task 1: MongoDB connection logic in the server entry file.
pub fn db_connection(sources: &Sources) -> TaskResult {
    let spec = RUBRIC[0];
    let text = &sources.server;
    let mut details = Vec::new();

    let uses_mongoose_connect = signals::matches(text, r"mongoose\.connect\s*\(");
    let uses_connect_db = signals::matches(text, r"connectDB\s*\(");
    let uses_process_env = signals::matches(text, r"process\.env\.");
    let has_try_catch = signals::try_catch_around(text, r"mongoose\.connect|connectDB");
    let logs_success = signals::contains_ci(text, "Mongo connected");
    let logs_error = signals::contains_ci(text, "Connection error");
    let awaits_connect = signals::matches(text, r"await\s+(mongoose\.connect|connectDB)");

    let mut completeness = 0;
    if uses_mongoose_connect || uses_connect_db {
        completeness += 3;
        details.push("MongoDB connection call found (mongoose.connect or connectDB).".into());
    } else {
        details.push("No MongoDB connection function found in index.js.".into());
    }
    if uses_process_env {
        completeness += 2;
        details.push("Uses environment variables via process.env (good practice).".into());
    } else {
        details.push("process.env usage not detected in connection code.".into());
    }

    let mut correctness = 0;
    if has_try_catch {
        correctness += 3;
        details.push("Connection wrapped in try/catch (proper error handling).".into());
    }
    if logs_success {
        correctness += 1;
        details.push("Logs \"Mongo connected\" on successful connection.".into());
    }
    if logs_error {
        correctness += 1;
        details.push("Logs \"Connection error\" on failure.".into());
    }

    let mut quality = 0;
    if uses_connect_db {
        quality += 2;
        details.push("Uses a separate connectDB helper (clean architecture).".into());
    }
    if awaits_connect {
        quality += 2;
        details.push("Uses async/await for the DB connection.".into());
    }

    TaskResult::from_parts(
        spec.id,
        spec.label,
        spec.caps,
        completeness,
        correctness,
        quality,
        details,
    )
}

/// Task 2: the Song schema and model export in the model file.
pub fn song_model(sources: &Sources) -> TaskResult {
    let spec = RUBRIC[1];
    let text = &sources.model;

    if text.is_empty() {
        return TaskResult::from_parts(
            spec.id,
            spec.label,
            spec.caps,
            0,
            0,
            0,
            vec!["song.model.js not found at server/models/song.model.js.".into()],
        );
    }

    let mut details = Vec::new();

    let has_import = signals::matches(text, r#"import\s+mongoose\s+from\s+["']mongoose["']"#);
    let has_schema = signals::matches(text, r"const\s+songSchema\s*=\s*new\s+mongoose\.Schema\s*\(");
    let has_model_export = signals::matches(
        text,
        r#"export\s+const\s+Song\s*=\s*mongoose\.model\(\s*["']Song["']"#,
    );

    let has_title = signals::schema_field(
        text,
        "title",
        &[r"type\s*:\s*String", r"required\s*:\s*true"],
    );
    let has_artist = signals::schema_field(
        text,
        "artist",
        &[r"type\s*:\s*String", r"required\s*:\s*true"],
    );
    let has_year = signals::schema_field(text, "year", &[r"type\s*:\s*Number"]);

    let title_trim = signals::schema_field(text, "title", &[r"trim\s*:\s*true"]);
    let artist_trim = signals::schema_field(text, "artist", &[r"trim\s*:\s*true"]);
    let year_min_max =
        signals::schema_field(text, "year", &[r"min\s*:\s*1900", r"max\s*:\s*2100"]);

    let has_timestamps = signals::matches(
        text,
        r"(?s)new\s+mongoose\.Schema\s*\(.*,\s*\{\s*.*timestamps\s*:\s*true.*\}\s*\)",
    );

    let mut completeness = 0;
    if has_import && has_schema {
        completeness += 2;
        details.push("Found mongoose import and songSchema definition.".into());
    } else if has_schema {
        completeness += 1;
        details.push("Found songSchema definition but mongoose import pattern not detected.".into());
    }
    if has_title {
        completeness += 2;
        details.push("Found 'title' field in schema.".into());
    } else {
        details.push("Missing 'title' field with proper object definition.".into());
    }
    if has_artist {
        completeness += 1;
        details.push("Found 'artist' field in schema.".into());
    } else {
        details.push("Missing 'artist' field with proper object definition.".into());
    }

    let mut correctness = 0;
    if has_title {
        correctness += 2;
        details.push("title is a String and required:true.".into());
    }
    if has_artist {
        correctness += 2;
        details.push("artist is a String and required:true.".into());
    }
    if has_year && year_min_max {
        correctness += 1;
        details.push("year is a Number with min 1900 and max 2100.".into());
    }

    let mut quality = 0;
    if title_trim && artist_trim {
        quality += 1;
        details.push("title and artist use trim:true.".into());
    }
    if year_min_max {
        quality += 1;
        details.push("year uses sensible min/max validation.".into());
    }
    if has_timestamps {
        quality += 2;
        details.push("Schema uses timestamps:true.".into());
    }

    if has_model_export {
        details.push("Exports Song model via mongoose.model(\"Song\", songSchema).".into());
    } else {
        details.push(
            "Could not detect export const Song = mongoose.model(\"Song\", songSchema).".into(),
        );
    }

    TaskResult::from_parts(
        spec.id,
        spec.label,
        spec.caps,
        completeness,
        correctness,
        quality,
        details,
    )
}

/// Task 3: the create route, `POST /api/songs`.
pub fn create_route(sources: &Sources) -> TaskResult {
    let spec = RUBRIC[2];
    let text = &sources.server;
    let mut details = Vec::new();

    let has_post = signals::route(text, "post", "/api/songs");
    let uses_create = signals::model_call(text, "create");
    let has_201 = signals::status_code(text, 201);
    let has_400 = signals::status_code(text, 400);
    let guarded = signals::guarded_handler(text, r"app\.post", r"Song\.create");

    let completeness = if has_post && uses_create {
        details.push("Found POST /api/songs route using Song.create(...) (good).".into());
        5
    } else if has_post {
        details.push("Found POST /api/songs route, but Song.create(...) not clearly detected.".into());
        3
    } else if uses_create {
        details.push("Found Song.create(...) but POST /api/songs route not clearly detected.".into());
        2
    } else {
        details.push("No POST /api/songs route or Song.create(...) usage found.".into());
        0
    };

    let correctness = if has_post && uses_create && has_201 {
        details.push("POST /api/songs sends 201 status when creating a song.".into());
        5
    } else if has_post && uses_create {
        details.push("POST /api/songs uses Song.create but 201 status code not clearly detected.".into());
        3
    } else {
        0
    };

    if has_400 {
        details.push("Found 400 status usage (validation/error handling).".into());
    }

    let quality = if guarded && has_400 {
        details.push("POST handler wraps Song.create in try/catch and returns 400 on errors.".into());
        4
    } else if has_post {
        details.push("POST handler exists but error handling could be more robust.".into());
        2
    } else {
        0
    };

    TaskResult::from_parts(
        spec.id,
        spec.label,
        spec.caps,
        completeness,
        correctness,
        quality,
        details,
    )
}

/// Task 4: the list and detail routes, `GET /api/songs` and `GET /api/songs/:id`.
pub fn read_routes(sources: &Sources) -> TaskResult {
    let spec = RUBRIC[3];
    let text = &sources.server;
    let mut details = Vec::new();

    let has_get_all = signals::route(text, "get", "/api/songs");
    let has_find = signals::model_call(text, "find");
    let sorts_newest_first =
        signals::matches(text, r"\.sort\s*\(\s*\{\s*createdAt\s*:\s*-1\s*\}\s*\)");
    let has_get_by_id = signals::route(text, "get", "/api/songs/:id");
    let has_find_by_id = signals::model_call(text, "findById");
    let has_404_msg = signals::matches(text, r#""Song not found""#);

    let mut completeness = 0;
    if has_get_all {
        completeness += 3;
        details.push("Found GET /api/songs route.".into());
    } else {
        details.push("Missing GET /api/songs route.".into());
    }
    if has_get_by_id {
        completeness += 2;
        details.push("Found GET /api/songs/:id route.".into());
    } else {
        details.push("Missing GET /api/songs/:id route.".into());
    }

    let mut correctness = 0;
    if has_get_all && has_find {
        correctness += 3;
        details.push("GET /api/songs uses Song.find() to get data.".into());
    }
    if sorts_newest_first {
        correctness += 1;
        details.push("GET /api/songs sorts by createdAt descending.".into());
    }
    if has_get_by_id && has_find_by_id && has_404_msg {
        correctness += 1;
        details.push("GET /api/songs/:id uses Song.findById and returns 404 when not found.".into());
    }

    let mut quality = 0;
    if has_get_all && sorts_newest_first {
        quality += 2;
        details.push("GET /api/songs returns newest songs first (good UX / API design).".into());
    }
    if has_get_by_id && has_404_msg {
        quality += 2;
        details.push("GET /api/songs/:id returns clear \"Song not found\" message when needed.".into());
    }

    TaskResult::from_parts(
        spec.id,
        spec.label,
        spec.caps,
        completeness,
        correctness,
        quality,
        details,
    )
}

/// Task 5: the update route, `PUT /api/songs/:id`.
pub fn update_route(sources: &Sources) -> TaskResult {
    let spec = RUBRIC[4];
    let text = &sources.server;
    let mut details = Vec::new();

    let has_put = signals::route(text, "put", "/api/songs/:id");
    let uses_update = signals::model_call(text, "findByIdAndUpdate");
    let has_options = signals::matches(
        text,
        r"(?s)findByIdAndUpdate\s*\(.*\{\s*[^}]*new\s*:\s*true[^}]*runValidators\s*:\s*true[^}]*\}",
    );
    let has_404_msg = signals::matches(text, r#""Song not found""#);
    let has_400 = signals::status_code(text, 400);
    let guarded = signals::guarded_handler(text, r"app\.put", r"findByIdAndUpdate");

    let completeness = if has_put && uses_update {
        details.push("Found PUT /api/songs/:id route using Song.findByIdAndUpdate.".into());
        5
    } else if has_put {
        details.push(
            "Found PUT /api/songs/:id route, but Song.findByIdAndUpdate not clearly detected."
                .into(),
        );
        3
    } else {
        details.push("No PUT /api/songs/:id route found.".into());
        0
    };

    let correctness = if has_put && uses_update && has_options {
        details.push(
            "PUT /api/songs/:id uses (new:true, runValidators:true) in findByIdAndUpdate.".into(),
        );
        5
    } else if has_put && uses_update {
        details.push(
            "PUT /api/songs/:id uses findByIdAndUpdate but without full options (new:true, runValidators:true)."
                .into(),
        );
        3
    } else {
        0
    };

    let mut quality = 0;
    if has_put && has_404_msg {
        quality += 2;
        details.push("PUT /api/songs/:id returns 404 with \"Song not found\" when ID is invalid.".into());
    }
    if guarded && has_400 {
        quality += 2;
        details.push("PUT /api/songs/:id handler uses try/catch and returns 400 on validation errors.".into());
    }

    TaskResult::from_parts(
        spec.id,
        spec.label,
        spec.caps,
        completeness,
        correctness,
        quality,
        details,
    )
}

/// Task 6: the delete route, `DELETE /api/songs/:id`.
pub fn delete_route(sources: &Sources) -> TaskResult {
    let spec = RUBRIC[5];
    let text = &sources.server;
    let mut details = Vec::new();

    let has_delete = signals::route(text, "delete", "/api/songs/:id");
    let uses_delete = signals::model_call(text, "findByIdAndDelete");
    let has_204 = signals::status_code(text, 204);
    let has_404_msg = signals::matches(text, r#""Song not found""#);

    let completeness = if has_delete && uses_delete {
        details.push("Found DELETE /api/songs/:id route using Song.findByIdAndDelete.".into());
        4
    } else if has_delete {
        details.push(
            "Found DELETE /api/songs/:id route, but Song.findByIdAndDelete not clearly detected."
                .into(),
        );
        2
    } else {
        details.push("No DELETE /api/songs/:id route found.".into());
        0
    };

    let correctness = if has_delete && uses_delete && has_204 {
        details.push("DELETE /api/songs/:id returns 204 No Content on successful deletion.".into());
        3
    } else if has_delete && uses_delete {
        details.push(
            "DELETE /api/songs/:id uses Song.findByIdAndDelete but 204 status not clearly detected."
                .into(),
        );
        2
    } else {
        0
    };

    let mut quality = 0;
    if has_delete && has_404_msg {
        quality += 2;
        details.push("DELETE /api/songs/:id returns 404 with \"Song not found\" when ID is invalid.".into());
    }
    if has_delete {
        quality += 1;
        details.push("DELETE handler exists with basic error handling / response logic.".into());
    }

    TaskResult::from_parts(
        spec.id,
        spec.label,
        spec.caps,
        completeness,
        correctness,
        quality,
        details,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOLUTION_SERVER: &str = include_str!("../testdata/index.js");
    const SOLUTION_MODEL: &str = include_str!("../testdata/song.model.js");

    fn solution() -> Sources {
        Sources {
            server: SOLUTION_SERVER.into(),
            model: SOLUTION_MODEL.into(),
        }
    }

    fn server_only(text: &str) -> Sources {
        Sources {
            server: text.into(),
            model: String::new(),
        }
    }

    #[test]
    fn rubric_sums_to_implementation_max() {
        let sum: u32 = RUBRIC.iter().map(|spec| spec.caps.total()).sum();
        assert_eq!(sum, crate::model::IMPLEMENTATION_MAX);
    }

    #[test]
    fn reference_solution_maxes_every_task() {
        for task in grade_all(&solution()) {
            assert!(
                task.is_fully_correct(),
                "task {} scored {}/{}: {:?}",
                task.id,
                task.score,
                task.max,
                task.details
            );
        }
    }

    #[test]
    fn empty_sources_score_zero_everywhere() {
        let tasks = grade_all(&Sources::default());
        for task in &tasks {
            assert_eq!(task.score, 0, "task {} should be 0", task.id);
            assert!(!task.details.is_empty(), "task {} must explain itself", task.id);
        }
    }

    #[test]
    fn db_connection_full_credit_evidence() {
        let task = db_connection(&solution());
        assert_eq!((task.completeness, task.correctness, task.quality), (5, 5, 4));
        assert!(task
            .details
            .contains(&"MongoDB connection call found (mongoose.connect or connectDB).".to_string()));
        assert!(task
            .details
            .contains(&"Connection wrapped in try/catch (proper error handling).".to_string()));
        assert!(task
            .details
            .contains(&"Uses async/await for the DB connection.".to_string()));
    }

    #[test]
    fn db_connection_without_helper_loses_quality() {
        let sources = server_only(
            "mongoose.connect(process.env.MONGO_URI)\n  .then(() => console.log(\"Mongo connected\"))\n  .catch(() => console.log(\"Connection error\"));",
        );
        let task = db_connection(&sources);
        // Connect call + env usage, success/error logs, but no try/catch,
        // no connectDB helper, no await.
        assert_eq!((task.completeness, task.correctness, task.quality), (5, 2, 0));
        assert_eq!(task.score, 7);
    }

    #[test]
    fn db_connection_missing_entirely() {
        let task = db_connection(&server_only("const app = express();"));
        assert_eq!(task.score, 0);
        assert_eq!(
            task.details,
            vec![
                "No MongoDB connection function found in index.js.".to_string(),
                "process.env usage not detected in connection code.".to_string(),
            ]
        );
    }

    #[test]
    fn song_model_full_credit() {
        let task = song_model(&solution());
        assert_eq!((task.completeness, task.correctness, task.quality), (5, 5, 4));
        assert_eq!(task.score, 14);
        assert!(task
            .details
            .contains(&"Exports Song model via mongoose.model(\"Song\", songSchema).".to_string()));
    }

    #[test]
    fn song_model_missing_file() {
        let task = song_model(&Sources::default());
        assert_eq!(task.score, 0);
        assert_eq!(
            task.details,
            vec!["song.model.js not found at server/models/song.model.js.".to_string()]
        );
    }

    #[test]
    fn song_model_without_import_gets_partial_completeness() {
        let text = "const songSchema = new mongoose.Schema({\n  title: { type: String, required: true },\n});";
        let task = song_model(&Sources {
            server: String::new(),
            model: text.into(),
        });
        assert!(task
            .details
            .contains(&"Found songSchema definition but mongoose import pattern not detected.".to_string()));
        // schema (1) + title (2), artist missing.
        assert_eq!(task.completeness, 3);
        assert_eq!(task.correctness, 2);
        assert_eq!(task.quality, 0);
    }

    #[test]
    fn create_route_full_credit() {
        let task = create_route(&solution());
        assert_eq!(task.score, 14);
        assert!(task
            .details
            .contains(&"POST /api/songs sends 201 status when creating a song.".to_string()));
        assert!(task
            .details
            .contains(&"POST handler wraps Song.create in try/catch and returns 400 on errors.".to_string()));
    }

    #[test]
    fn create_route_without_model_call_is_degraded() {
        let task = create_route(&server_only(
            "app.post(\"/api/songs\", (req, res) => res.json(req.body));",
        ));
        assert_eq!(task.completeness, 3);
        assert_eq!(task.correctness, 0);
        assert_eq!(task.quality, 2);
        assert!(task
            .details
            .contains(&"Found POST /api/songs route, but Song.create(...) not clearly detected.".to_string()));
        assert!(task
            .details
            .contains(&"POST handler exists but error handling could be more robust.".to_string()));
    }

    #[test]
    fn create_route_model_call_without_route() {
        let task = create_route(&server_only("const song = await Song.create(data);"));
        assert_eq!(task.completeness, 2);
        assert_eq!(task.score, 2);
        assert!(task
            .details
            .contains(&"Found Song.create(...) but POST /api/songs route not clearly detected.".to_string()));
    }

    #[test]
    fn read_routes_full_credit() {
        let task = read_routes(&solution());
        assert_eq!((task.completeness, task.correctness, task.quality), (5, 5, 4));
    }

    #[test]
    fn read_routes_list_only() {
        let task = read_routes(&server_only(
            "app.get(\"/api/songs\", async (req, res) => {\n  res.json(await Song.find().sort({ createdAt: -1 }));\n});",
        ));
        // list route (3), find (3) + sort (1), newest-first quality (2).
        assert_eq!((task.completeness, task.correctness, task.quality), (3, 4, 2));
        assert!(task
            .details
            .contains(&"Missing GET /api/songs/:id route.".to_string()));
    }

    #[test]
    fn update_route_without_options_is_degraded() {
        let task = update_route(&server_only(
            "app.put(\"/api/songs/:id\", async (req, res) => {\n  const song = await Song.findByIdAndUpdate(req.params.id, req.body);\n  res.json(song);\n});",
        ));
        assert_eq!(task.completeness, 5);
        assert_eq!(task.correctness, 3);
        assert!(task.details.contains(
            &"PUT /api/songs/:id uses findByIdAndUpdate but without full options (new:true, runValidators:true)."
                .to_string()
        ));
    }

    #[test]
    fn update_route_full_credit() {
        let task = update_route(&solution());
        assert_eq!(task.score, 14);
        assert!(task.details.contains(
            &"PUT /api/songs/:id uses (new:true, runValidators:true) in findByIdAndUpdate.".to_string()
        ));
    }

    #[test]
    fn delete_route_without_204_is_degraded() {
        let task = delete_route(&server_only(
            "app.delete(\"/api/songs/:id\", async (req, res) => {\n  await Song.findByIdAndDelete(req.params.id);\n  res.json({ ok: true });\n});",
        ));
        assert_eq!(task.completeness, 4);
        assert_eq!(task.correctness, 2);
        assert_eq!(task.quality, 1);
        assert!(task.details.contains(
            &"DELETE /api/songs/:id uses Song.findByIdAndDelete but 204 status not clearly detected."
                .to_string()
        ));
    }

    #[test]
    fn delete_route_full_credit() {
        let task = delete_route(&solution());
        assert_eq!(task.score, 10);
        assert_eq!((task.completeness, task.correctness, task.quality), (4, 3, 3));
    }

    #[test]
    fn grading_is_deterministic() {
        let first = grade_all(&solution());
        let second = grade_all(&solution());
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.score, b.score);
            assert_eq!(a.details, b.details);
        }
    }
}
