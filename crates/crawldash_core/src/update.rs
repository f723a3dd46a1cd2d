use crate::{normalize_urls, AppState, Effect, Msg, Notice, SubmitResult};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputAppended(line) => {
            state.append_input(&line);
            Vec::new()
        }
        Msg::InputCleared => {
            state.clear_input();
            Vec::new()
        }
        Msg::UrlsSubmitted => {
            let urls = normalize_urls(state.input().trim());
            if urls.is_empty() {
                return (state, vec![Effect::Alert(Notice::NoUrls)]);
            }
            state.begin_submission();
            vec![Effect::SubmitCrawl {
                urls,
                limit: state.limit(),
            }]
        }
        Msg::SubmitFinished(result) => {
            state.finish_submission();
            // The batch is cleared whatever the outcome.
            state.clear_input();
            submission_notices(&result)
        }
        Msg::EndpointSubmitted(candidate) => match state.set_endpoint(&candidate) {
            Ok(endpoint) => vec![
                Effect::ApplyEndpoint(endpoint),
                Effect::Alert(Notice::EndpointSaved),
            ],
            Err(_) => vec![Effect::Alert(Notice::InvalidEndpoint)],
        },
        Msg::LimitSubmitted(raw) => match raw.trim().parse::<u32>() {
            Ok(limit) => {
                state.set_limit(limit);
                vec![Effect::Alert(Notice::LimitSaved(limit))]
            }
            Err(_) => vec![Effect::Alert(Notice::InvalidLimit(raw))],
        },
        Msg::FilterChanged(filter) => {
            state.set_filter(filter);
            Vec::new()
        }
        Msg::StatusReceived { rows, received_at } => {
            state.apply_snapshot(rows, received_at);
            Vec::new()
        }
        Msg::StatusIgnored { received_at } => {
            state.note_poll_ok(received_at);
            Vec::new()
        }
        Msg::PollFailed { message } => {
            state.note_poll_failure(message);
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn submission_notices(result: &SubmitResult) -> Vec<Effect> {
    let mut effects = Vec::with_capacity(2);
    if let Some(code) = result.http_status {
        effects.push(Effect::Alert(Notice::HttpStatusNotOk(code)));
    }
    let notice = match &result.outcome {
        Ok(true) => Notice::CrawlStarted,
        Ok(false) => Notice::PendingTasks,
        Err(_) => Notice::RequestFailed,
    };
    effects.push(Effect::Alert(notice));
    effects
}
