#[derive(Debug, Serialize)]
struct ListGamesResponse {
    schema_version: String,
    games: Vec<contracts::GameInfo>,
}

async fn list_games() -> Json<ListGamesResponse> {
    Json(ListGamesResponse {
        schema_version: SCHEMA_VERSION_V1.to_string(),
        games: quiz_core::catalog::list_games(),
    })
}

#[derive(Debug, Serialize)]
struct ShellResponse {
    schema_version: String,
    run_id: String,
    shell: ShellView,
}

async fn get_shell(
    Path(run_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<ShellResponse>, HttpApiError> {
    let response = {
        let inner = state.inner.lock().await;
        let engine = require_run(&inner, &run_id)?;
        ShellResponse {
            schema_version: SCHEMA_VERSION_V1.to_string(),
            run_id: run_id.clone(),
            shell: engine.shell_view(),
        }
    };

    Ok(Json(response))
}

#[derive(Debug, Deserialize, Default)]
struct TimelineQuery {
    from_ms: Option<u64>,
    to_ms: Option<u64>,
    #[serde(default)]
    event_types: Vec<String>,
    #[serde(rename = "event_types[]", default)]
    event_types_bracket: Vec<String>,
    stage_id: Option<String>,
    cursor: Option<usize>,
    page_size: Option<usize>,
}

#[derive(Debug, Serialize)]
struct TimelinePage {
    schema_version: String,
    run_id: String,
    cursor: usize,
    next_cursor: Option<usize>,
    from_ms: u64,
    to_ms: u64,
    total: usize,
    events: Vec<Event>,
}

async fn get_timeline(
    Path(run_id): Path<String>,
    State(state): State<AppState>,
    Query(query): Query<TimelineQuery>,
) -> Result<Json<TimelinePage>, HttpApiError> {
    let response = {
        let inner = state.inner.lock().await;
        let engine = require_run(&inner, &run_id)?;

        let from_ms = query.from_ms.unwrap_or(0);
        let to_ms = query.to_ms.unwrap_or(engine.now_ms());

        if to_ms < from_ms {
            return Err(HttpApiError::invalid_query(
                "to_ms must be >= from_ms",
                Some(format!("from_ms={from_ms} to_ms={to_ms}")),
            ));
        }

        let mut requested_types = query.event_types;
        requested_types.extend(query.event_types_bracket);
        let event_type_filter = parse_event_type_filter(&requested_types)?;

        let mut filtered = Vec::new();
        for event in engine.events() {
            if event.at_ms < from_ms || event.at_ms > to_ms {
                continue;
            }

            if let Some(filter) = &event_type_filter {
                if !filter.contains(&event.event_type) {
                    continue;
                }
            }

            if let Some(stage_id) = &query.stage_id {
                if event.stage_id.as_deref() != Some(stage_id.as_str()) {
                    continue;
                }
            }

            filtered.push(event.clone());
        }

        let (start, end, next_cursor) = paginate(filtered.len(), query.cursor, query.page_size)?;

        TimelinePage {
            schema_version: SCHEMA_VERSION_V1.to_string(),
            run_id: run_id.clone(),
            cursor: start,
            next_cursor,
            from_ms,
            to_ms,
            total: filtered.len(),
            events: filtered[start..end].to_vec(),
        }
    };

    Ok(Json(response))
}

#[derive(Debug, Deserialize, Default)]
struct PaginationQuery {
    cursor: Option<usize>,
    page_size: Option<usize>,
}

#[derive(Debug, Serialize)]
struct CommandAuditPage {
    schema_version: String,
    run_id: String,
    cursor: usize,
    next_cursor: Option<usize>,
    results: Vec<CommandResult>,
}

async fn get_commands(
    Path(run_id): Path<String>,
    State(state): State<AppState>,
    Query(query): Query<PaginationQuery>,
) -> Result<Json<CommandAuditPage>, HttpApiError> {
    let response = {
        let inner = state.inner.lock().await;
        let engine = require_run(&inner, &run_id)?;
        let results = engine.command_audit();
        let (start, end, next_cursor) = paginate(results.len(), query.cursor, query.page_size)?;

        CommandAuditPage {
            schema_version: SCHEMA_VERSION_V1.to_string(),
            run_id: run_id.clone(),
            cursor: start,
            next_cursor,
            results: results[start..end].to_vec(),
        }
    };

    Ok(Json(response))
}
