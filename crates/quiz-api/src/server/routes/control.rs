#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CreateRunRequest {
    Config(RunConfig),
    WithOptions(CreateRunOptions),
}

#[derive(Debug, Deserialize)]
struct CreateRunOptions {
    config: RunConfig,
    replace_existing: Option<bool>,
}

#[derive(Debug, Serialize)]
struct CreateRunResponse {
    schema_version: String,
    run_id: String,
    status: RunStatus,
    shell: ShellView,
    replaced_existing_run: bool,
}

async fn create_run(
    State(state): State<AppState>,
    Json(request): Json<CreateRunRequest>,
) -> Result<Json<CreateRunResponse>, HttpApiError> {
    let (config, replace_existing) = match request {
        CreateRunRequest::Config(config) => (config, true),
        CreateRunRequest::WithOptions(options) => {
            (options.config, options.replace_existing.unwrap_or(true))
        }
    };

    let (response, messages) = {
        let mut inner = state.inner.lock().await;
        let replaced_existing_run = inner.engine.is_some();
        if replaced_existing_run && !replace_existing {
            return Err(HttpApiError::run_conflict(
                "a run is already active; pass replace_existing=true to replace it",
                inner
                    .engine
                    .as_ref()
                    .map(|engine| format!("active_run_id={}", engine.run_id())),
            ));
        }

        let engine = EngineApi::from_config(config, EngineClock::wall())
            .map_err(HttpApiError::from_create)?;
        let status = engine.status();
        let shell = engine.shell_view();
        inner.engine = Some(engine);
        inner.emitted_event_count = 0;

        let mut messages = Vec::new();
        if replaced_existing_run {
            messages.push(StreamMessage::warning(
                &status.run_id,
                0,
                "existing run state was replaced by POST /runs".to_string(),
            ));
        }
        messages.extend(collect_delta_messages(&mut inner));
        messages.push(StreamMessage::run_status(&status));

        (
            CreateRunResponse {
                schema_version: SCHEMA_VERSION_V1.to_string(),
                run_id: status.run_id.clone(),
                status,
                shell,
                replaced_existing_run,
            },
            messages,
        )
    };

    broadcast_messages(&state, messages);

    Ok(Json(response))
}

#[derive(Debug, Serialize)]
struct CommandResponse {
    schema_version: String,
    run_id: String,
    result: CommandResult,
    status: RunStatus,
}

/// Apply one command payload to the active run. Rejections come back as an
/// HTTP 200 with `result.accepted == false`; only an unknown run is an error
/// status, matching how the shell treats guarded no-ops as ordinary replies.
async fn apply_payload(
    state: &AppState,
    run_id: &str,
    payload: CommandPayload,
) -> Result<Json<CommandResponse>, HttpApiError> {
    let (response, messages) = {
        let mut inner = state.inner.lock().await;
        let (result, status, now_ms) = {
            let engine = require_run_mut(&mut inner, run_id)?;
            let result = engine.submit(payload);
            (result, engine.status(), engine.now_ms())
        };

        let mut messages = collect_delta_messages(&mut inner);
        messages.push(StreamMessage::command_result(&result, now_ms));
        messages.push(StreamMessage::run_status(&status));

        (
            CommandResponse {
                schema_version: SCHEMA_VERSION_V1.to_string(),
                run_id: run_id.to_string(),
                result,
                status,
            },
            messages,
        )
    };

    broadcast_messages(state, messages);

    Ok(Json(response))
}

#[derive(Debug, Deserialize)]
struct SelectRequest {
    option_id: String,
}

async fn select_option(
    Path(run_id): Path<String>,
    State(state): State<AppState>,
    Json(request): Json<SelectRequest>,
) -> Result<Json<CommandResponse>, HttpApiError> {
    apply_payload(
        &state,
        &run_id,
        CommandPayload::SelectOption {
            option_id: request.option_id,
        },
    )
    .await
}

async fn advance_run(
    Path(run_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<CommandResponse>, HttpApiError> {
    apply_payload(&state, &run_id, CommandPayload::Advance).await
}

async fn finish_run(
    Path(run_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<CommandResponse>, HttpApiError> {
    apply_payload(&state, &run_id, CommandPayload::Finish).await
}

async fn retry_run(
    Path(run_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<CommandResponse>, HttpApiError> {
    apply_payload(&state, &run_id, CommandPayload::Retry).await
}

#[derive(Debug, Serialize)]
struct StatusResponse {
    schema_version: String,
    run_id: String,
    status: RunStatus,
    now_ms: u64,
    next_transition_at_ms: Option<u64>,
}

async fn get_status(
    Path(run_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<StatusResponse>, HttpApiError> {
    let response = {
        let inner = state.inner.lock().await;
        let engine = require_run(&inner, &run_id)?;
        let status = engine.status();
        StatusResponse {
            schema_version: SCHEMA_VERSION_V1.to_string(),
            run_id: status.run_id.clone(),
            now_ms: engine.now_ms(),
            next_transition_at_ms: engine.next_transition_at(),
            status,
        }
    };

    Ok(Json(response))
}
