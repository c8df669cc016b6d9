//! Scripts mix commands and queries, one JSON object per line.

use crate::{execute_command, execute_query, Command, CommandResult, Query, QueryResult};
use editor::Editor;
use serde::{Deserialize, Serialize};

/// A command or a query, told apart by its `type`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Request {
    Command(Command),
    Query(Query),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Response {
    Command(CommandResult),
    Query(QueryResult),
}

impl Response {
    pub fn is_error(&self) -> bool {
        match self {
            Response::Command(result) => !result.is_success(),
            Response::Query(result) => matches!(result, QueryResult::Error { .. }),
        }
    }
}

pub fn execute_request(editor: &mut Editor, request: Request) -> Response {
    match request {
        Request::Command(command) => Response::Command(execute_command(editor, command)),
        Request::Query(query) => Response::Query(execute_query(editor, query)),
    }
}
