fn apply_cors_headers(headers: &mut axum::http::HeaderMap) {
    headers.insert(
        HeaderName::from_static("access-control-allow-origin"),
        HeaderValue::from_static("*"),
    );
    headers.insert(
        HeaderName::from_static("access-control-allow-methods"),
        HeaderValue::from_static("GET,POST,OPTIONS,PUT,PATCH,DELETE"),
    );
    headers.insert(
        HeaderName::from_static("access-control-allow-headers"),
        HeaderValue::from_static("*"),
    );
    headers.insert(
        HeaderName::from_static("access-control-max-age"),
        HeaderValue::from_static("3600"),
    );
}

fn paginate(
    total: usize,
    cursor: Option<usize>,
    page_size: Option<usize>,
) -> Result<(usize, usize, Option<usize>), HttpApiError> {
    let start = cursor.unwrap_or(0);
    if start > total {
        return Err(HttpApiError::invalid_query(
            "cursor is out of bounds",
            Some(format!("cursor={start} total={total}")),
        ));
    }

    let size = page_size
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .max(1)
        .min(MAX_PAGE_SIZE);
    let end = start.saturating_add(size).min(total);
    let next_cursor = if end < total { Some(end) } else { None };

    Ok((start, end, next_cursor))
}

fn parse_event_type_filter(
    requested_types: &[String],
) -> Result<Option<HashSet<EventType>>, HttpApiError> {
    if requested_types.is_empty() {
        return Ok(None);
    }

    let mut filter = HashSet::new();

    for value in requested_types {
        let normalized = value.trim().to_lowercase();
        let event_type = match normalized.as_str() {
            "run_started" | "runstarted" => EventType::RunStarted,
            "option_selected" | "optionselected" => EventType::OptionSelected,
            "answer_revealed" | "answerrevealed" => EventType::AnswerRevealed,
            "feedback_emitted" | "feedbackemitted" => EventType::FeedbackEmitted,
            "advance_unlocked" | "advanceunlocked" => EventType::AdvanceUnlocked,
            "stage_advanced" | "stageadvanced" => EventType::StageAdvanced,
            "timer_expired" | "timerexpired" => EventType::TimerExpired,
            "run_completed" | "runcompleted" => EventType::RunCompleted,
            "completion_submitted" | "completionsubmitted" => EventType::CompletionSubmitted,
            "run_retried" | "runretried" => EventType::RunRetried,
            "command_applied" | "commandapplied" => EventType::CommandApplied,
            _ => {
                return Err(HttpApiError::invalid_query(
                    "invalid event type filter",
                    Some(format!("event_type={value}")),
                ))
            }
        };

        filter.insert(event_type);
    }

    Ok(Some(filter))
}

fn reconnect_token(at_ms: u64, sequence: Option<u64>, label: &str) -> String {
    match sequence {
        Some(sequence) => format!("{label}:{at_ms}:{sequence}"),
        None => format!("{label}:{at_ms}"),
    }
}
