//! The built-in node catalogue.
//!
//! One entry per known node type. Parameter schemas list what validation
//! checks and what auto-fill repairs; `required` drives both. Parameters the
//! semantic rules own outright (conditions, code bodies) are declared but
//! not marked required so the generic checks don't double-report them.

use super::node_types as t;
use super::{Category, NodeDefinition, ParamDefault, ParameterSpec};

const IN_MAIN: &[&str] = &["main"];
const OUT_MAIN: &[&str] = &["main"];
const OUT_TWO: &[&str] = &["main", "main"];
const OUT_FOUR: &[&str] = &["main", "main", "main", "main"];
const NO_PORTS: &[&str] = &[];

const HTTP_METHODS: &[&str] = &["GET", "POST", "PUT", "DELETE", "PATCH", "HEAD"];

pub(crate) fn builtin_nodes() -> Vec<NodeDefinition> {
    let mut nodes = Vec::new();
    nodes.extend(triggers());
    nodes.extend(actions());
    nodes.extend(integrations());
    nodes.extend(data_nodes());
    nodes.extend(logic_nodes());
    nodes.extend(utility_nodes());
    nodes
}

fn triggers() -> Vec<NodeDefinition> {
    vec![
        NodeDefinition {
            type_name: t::MANUAL_TRIGGER,
            display_name: "Manual Trigger",
            description: "Starts the workflow when triggered manually",
            category: Category::Trigger,
            keywords: &["start", "manual", "test", "run"],
            parameters: vec![],
            inputs: NO_PORTS,
            outputs: OUT_MAIN,
        },
        NodeDefinition {
            type_name: t::SCHEDULE_TRIGGER,
            display_name: "Schedule Trigger",
            description: "Starts the workflow on a fixed schedule",
            category: Category::Trigger,
            keywords: &["cron", "schedule", "timer", "interval", "poll"],
            parameters: vec![
                ParameterSpec::collection("rule").default(ParamDefault::EmptyObject),
            ],
            inputs: NO_PORTS,
            outputs: OUT_MAIN,
        },
        NodeDefinition {
            type_name: t::CRON,
            display_name: "Cron",
            description: "Starts the workflow on a cron expression (legacy)",
            category: Category::Trigger,
            keywords: &["cron", "schedule", "timer"],
            parameters: vec![
                ParameterSpec::collection("triggerTimes").default(ParamDefault::EmptyObject),
            ],
            inputs: NO_PORTS,
            outputs: OUT_MAIN,
        },
        NodeDefinition {
            type_name: t::WEBHOOK,
            display_name: "Webhook",
            description: "Starts the workflow when an HTTP request arrives",
            category: Category::Trigger,
            keywords: &["http", "callback", "receive", "endpoint"],
            parameters: vec![
                ParameterSpec::string("path").required(),
                ParameterSpec::options("httpMethod", HTTP_METHODS),
                ParameterSpec::options("responseMode", &["onReceived", "lastNode"])
                    .default(ParamDefault::Str("onReceived")),
                ParameterSpec::options("authentication", &["none", "basicAuth", "headerAuth"])
                    .default(ParamDefault::Str("none")),
            ],
            inputs: NO_PORTS,
            outputs: OUT_MAIN,
        },
        NodeDefinition {
            type_name: t::ERROR_TRIGGER,
            display_name: "Error Trigger",
            description: "Starts the workflow when another workflow errors",
            category: Category::Trigger,
            keywords: &["error", "failure", "catch"],
            parameters: vec![],
            inputs: NO_PORTS,
            outputs: OUT_MAIN,
        },
    ]
}

fn actions() -> Vec<NodeDefinition> {
    vec![
        NodeDefinition {
            type_name: t::HTTP_REQUEST,
            display_name: "HTTP Request",
            description: "Makes an HTTP request and returns the response",
            category: Category::Action,
            keywords: &["http", "api", "rest", "fetch", "call", "request"],
            parameters: vec![
                ParameterSpec::string("url").required(),
                ParameterSpec::options("method", HTTP_METHODS).default(ParamDefault::Str("GET")),
                ParameterSpec::options(
                    "authentication",
                    &["none", "basicAuth", "headerAuth", "oAuth2"],
                )
                .default(ParamDefault::Str("none")),
                ParameterSpec::boolean("sendHeaders").default(ParamDefault::Bool(false)),
                ParameterSpec::boolean("sendBody").default(ParamDefault::Bool(false)),
                ParameterSpec::number("timeout").default(ParamDefault::Num(10000.0)),
            ],
            inputs: IN_MAIN,
            outputs: OUT_MAIN,
        },
        NodeDefinition {
            type_name: t::RESPOND_TO_WEBHOOK,
            display_name: "Respond to Webhook",
            description: "Returns a response to the webhook that started the workflow",
            category: Category::Action,
            keywords: &["http", "response", "reply"],
            parameters: vec![
                ParameterSpec::options(
                    "respondWith",
                    &["firstIncomingItem", "text", "json", "noData"],
                )
                .default(ParamDefault::Str("firstIncomingItem")),
                ParameterSpec::number("responseCode").default(ParamDefault::Num(200.0)),
            ],
            inputs: IN_MAIN,
            outputs: OUT_MAIN,
        },
        NodeDefinition {
            type_name: t::EXECUTE_COMMAND,
            display_name: "Execute Command",
            description: "Executes a shell command on the host",
            category: Category::Action,
            keywords: &["shell", "command", "bash", "script"],
            parameters: vec![
                ParameterSpec::string("command")
                    .required()
                    .placeholder("echo \"hello\""),
            ],
            inputs: IN_MAIN,
            outputs: OUT_MAIN,
        },
    ]
}

fn integrations() -> Vec<NodeDefinition> {
    vec![
        NodeDefinition {
            type_name: t::EMAIL_SEND,
            display_name: "Send Email",
            description: "Sends an email over SMTP",
            category: Category::Integration,
            keywords: &["email", "mail", "smtp", "send"],
            parameters: vec![
                ParameterSpec::string("fromEmail").required(),
                ParameterSpec::string("toEmail").required(),
                ParameterSpec::string("subject"),
                ParameterSpec::string("text"),
            ],
            inputs: IN_MAIN,
            outputs: OUT_MAIN,
        },
        NodeDefinition {
            type_name: t::GMAIL,
            display_name: "Gmail",
            description: "Sends and manages email through Gmail",
            category: Category::Integration,
            keywords: &["email", "mail", "google", "send"],
            parameters: vec![
                ParameterSpec::options("resource", &["message", "draft", "label"])
                    .default(ParamDefault::Str("message")),
                ParameterSpec::options("operation", &["send", "get", "getAll", "delete"])
                    .default(ParamDefault::Str("send")),
                ParameterSpec::string("sendTo").required(),
                ParameterSpec::string("subject"),
                ParameterSpec::string("message"),
            ],
            inputs: IN_MAIN,
            outputs: OUT_MAIN,
        },
        NodeDefinition {
            type_name: t::SLACK,
            display_name: "Slack",
            description: "Sends messages and manages channels in Slack",
            category: Category::Integration,
            keywords: &["message", "chat", "notification", "channel"],
            parameters: vec![
                ParameterSpec::options("resource", &["message", "channel", "user"])
                    .default(ParamDefault::Str("message")),
                ParameterSpec::string("channel").required().placeholder("#general"),
                ParameterSpec::string("text"),
            ],
            inputs: IN_MAIN,
            outputs: OUT_MAIN,
        },
        NodeDefinition {
            type_name: t::TELEGRAM,
            display_name: "Telegram",
            description: "Sends messages through a Telegram bot",
            category: Category::Integration,
            keywords: &["message", "chat", "bot", "notification"],
            parameters: vec![
                ParameterSpec::string("chatId").required(),
                ParameterSpec::string("text"),
            ],
            inputs: IN_MAIN,
            outputs: OUT_MAIN,
        },
        NodeDefinition {
            type_name: t::DISCORD,
            display_name: "Discord",
            description: "Sends messages to a Discord channel",
            category: Category::Integration,
            keywords: &["message", "chat", "notification"],
            parameters: vec![
                ParameterSpec::string("channelId").required(),
                ParameterSpec::string("content"),
            ],
            inputs: IN_MAIN,
            outputs: OUT_MAIN,
        },
        NodeDefinition {
            type_name: t::GOOGLE_SHEETS,
            display_name: "Google Sheets",
            description: "Reads and writes rows in a Google Sheets document",
            category: Category::Integration,
            keywords: &["spreadsheet", "sheet", "google", "table", "rows"],
            parameters: vec![
                ParameterSpec::options("operation", &["append", "read", "update", "delete"])
                    .default(ParamDefault::Str("append")),
                ParameterSpec::string("documentId").required(),
                ParameterSpec::string("sheetName")
                    .required()
                    .default(ParamDefault::Str("Sheet1")),
            ],
            inputs: IN_MAIN,
            outputs: OUT_MAIN,
        },
        NodeDefinition {
            type_name: t::AIRTABLE,
            display_name: "Airtable",
            description: "Reads and writes records in an Airtable base",
            category: Category::Integration,
            keywords: &["table", "database", "records", "base"],
            parameters: vec![
                ParameterSpec::options("operation", &["append", "list", "read", "update"])
                    .default(ParamDefault::Str("append")),
                ParameterSpec::string("baseId").required(),
                ParameterSpec::string("table").required(),
            ],
            inputs: IN_MAIN,
            outputs: OUT_MAIN,
        },
        NodeDefinition {
            type_name: t::NOTION,
            display_name: "Notion",
            description: "Creates and queries pages in a Notion workspace",
            category: Category::Integration,
            keywords: &["notes", "database", "page", "wiki"],
            parameters: vec![
                ParameterSpec::options("resource", &["database", "page", "block"])
                    .default(ParamDefault::Str("page")),
                ParameterSpec::options("operation", &["create", "get", "update"])
                    .default(ParamDefault::Str("create")),
                ParameterSpec::string("databaseId").required(),
            ],
            inputs: IN_MAIN,
            outputs: OUT_MAIN,
        },
        NodeDefinition {
            type_name: t::POSTGRES,
            display_name: "Postgres",
            description: "Runs queries against a PostgreSQL database",
            category: Category::Integration,
            keywords: &["database", "sql", "query", "table"],
            parameters: vec![
                ParameterSpec::options("operation", &["executeQuery", "insert", "update"])
                    .default(ParamDefault::Str("executeQuery")),
                ParameterSpec::string("query")
                    .required()
                    .placeholder("SELECT * FROM table_name;"),
            ],
            inputs: IN_MAIN,
            outputs: OUT_MAIN,
        },
        NodeDefinition {
            type_name: t::GITHUB,
            display_name: "GitHub",
            description: "Creates and manages issues, releases, and repositories",
            category: Category::Integration,
            keywords: &["git", "issue", "repository", "release"],
            parameters: vec![
                ParameterSpec::options("resource", &["issue", "repository", "release"])
                    .default(ParamDefault::Str("issue")),
                ParameterSpec::options("operation", &["create", "get", "getAll"])
                    .default(ParamDefault::Str("create")),
                ParameterSpec::string("owner").required(),
                ParameterSpec::string("repository").required(),
            ],
            inputs: IN_MAIN,
            outputs: OUT_MAIN,
        },
        NodeDefinition {
            type_name: t::OPEN_AI,
            display_name: "OpenAI",
            description: "Sends prompts to OpenAI models",
            category: Category::Integration,
            keywords: &["ai", "llm", "gpt", "completion", "chat"],
            parameters: vec![
                ParameterSpec::options("resource", &["chat", "text", "image"])
                    .default(ParamDefault::Str("chat")),
                ParameterSpec::string("model").default(ParamDefault::Str("gpt-3.5-turbo")),
                ParameterSpec::string("prompt").required(),
            ],
            inputs: IN_MAIN,
            outputs: OUT_MAIN,
        },
    ]
}

fn data_nodes() -> Vec<NodeDefinition> {
    vec![
        NodeDefinition {
            type_name: t::SET,
            display_name: "Edit Fields (Set)",
            description: "Sets, renames, and removes fields on passing items",
            category: Category::Data,
            keywords: &["set", "transform", "fields", "rename"],
            parameters: vec![
                ParameterSpec::options("mode", &["manual", "raw"])
                    .default(ParamDefault::Str("manual")),
                ParameterSpec::collection("assignments").default(ParamDefault::EmptyObject),
            ],
            inputs: IN_MAIN,
            outputs: OUT_MAIN,
        },
        NodeDefinition {
            type_name: t::MERGE,
            display_name: "Merge",
            description: "Combines items from two input branches",
            category: Category::Data,
            keywords: &["combine", "join", "branches", "union"],
            parameters: vec![
                ParameterSpec::options("mode", &["append", "combine", "chooseBranch"])
                    .default(ParamDefault::Str("append")),
            ],
            inputs: &["main", "main"],
            outputs: OUT_MAIN,
        },
        NodeDefinition {
            type_name: t::SPLIT_IN_BATCHES,
            display_name: "Loop Over Items",
            description: "Splits items into batches and loops over them",
            category: Category::Data,
            keywords: &["batch", "loop", "iterate", "chunk"],
            parameters: vec![
                ParameterSpec::number("batchSize").default(ParamDefault::Num(10.0)),
            ],
            inputs: IN_MAIN,
            outputs: OUT_TWO,
        },
        NodeDefinition {
            type_name: t::ITEM_LISTS,
            display_name: "Item Lists",
            description: "Splits, aggregates, and deduplicates item lists",
            category: Category::Data,
            keywords: &["list", "split", "aggregate", "dedupe"],
            parameters: vec![
                ParameterSpec::options(
                    "operation",
                    &["splitOutItems", "aggregateItems", "removeDuplicates"],
                )
                .default(ParamDefault::Str("splitOutItems")),
                ParameterSpec::string("fieldToSplitOut"),
            ],
            inputs: IN_MAIN,
            outputs: OUT_MAIN,
        },
    ]
}

fn logic_nodes() -> Vec<NodeDefinition> {
    vec![
        NodeDefinition {
            type_name: t::IF,
            display_name: "If",
            description: "Routes items to the true or false branch of a condition",
            category: Category::Logic,
            keywords: &["condition", "branch", "route", "boolean"],
            parameters: vec![
                ParameterSpec::collection("conditions"),
                ParameterSpec::options("combineOperation", &["all", "any"])
                    .default(ParamDefault::Str("all")),
            ],
            inputs: IN_MAIN,
            outputs: OUT_TWO,
        },
        NodeDefinition {
            type_name: t::SWITCH,
            display_name: "Switch",
            description: "Routes items to one of several branches by rule",
            category: Category::Logic,
            keywords: &["condition", "branch", "route", "case"],
            parameters: vec![
                ParameterSpec::options("mode", &["rules", "expression"])
                    .default(ParamDefault::Str("rules")),
                ParameterSpec::collection("rules").default(ParamDefault::EmptyObject),
            ],
            inputs: IN_MAIN,
            outputs: OUT_FOUR,
        },
        NodeDefinition {
            type_name: t::FILTER,
            display_name: "Filter",
            description: "Drops items that do not match the configured conditions",
            category: Category::Logic,
            keywords: &["condition", "filter", "remove", "match"],
            parameters: vec![ParameterSpec::collection("conditions")],
            inputs: IN_MAIN,
            outputs: OUT_MAIN,
        },
    ]
}

fn utility_nodes() -> Vec<NodeDefinition> {
    vec![
        NodeDefinition {
            type_name: t::CODE,
            display_name: "Code",
            description: "Runs custom JavaScript over the passing items",
            category: Category::Utility,
            keywords: &["javascript", "function", "script", "custom"],
            parameters: vec![
                ParameterSpec::options("mode", &["runOnceForAllItems", "runOnceForEachItem"])
                    .default(ParamDefault::Str("runOnceForAllItems")),
                ParameterSpec::string("jsCode"),
            ],
            inputs: IN_MAIN,
            outputs: OUT_MAIN,
        },
        NodeDefinition {
            type_name: t::NO_OP,
            display_name: "No Operation",
            description: "Passes items through unchanged",
            category: Category::Utility,
            keywords: &["noop", "passthrough", "placeholder"],
            parameters: vec![],
            inputs: IN_MAIN,
            outputs: OUT_MAIN,
        },
        NodeDefinition {
            type_name: t::WAIT,
            display_name: "Wait",
            description: "Pauses the workflow for an interval or until a webhook",
            category: Category::Utility,
            keywords: &["pause", "delay", "sleep", "resume"],
            parameters: vec![
                ParameterSpec::options("resume", &["timeInterval", "specificTime", "webhook"])
                    .default(ParamDefault::Str("timeInterval")),
                ParameterSpec::number("amount").default(ParamDefault::Num(1.0)),
                ParameterSpec::options("unit", &["seconds", "minutes", "hours", "days"])
                    .default(ParamDefault::Str("seconds")),
            ],
            inputs: IN_MAIN,
            outputs: OUT_MAIN,
        },
        NodeDefinition {
            type_name: t::STOP_AND_ERROR,
            display_name: "Stop and Error",
            description: "Fails the workflow with a custom error message",
            category: Category::Utility,
            keywords: &["error", "fail", "abort", "throw"],
            parameters: vec![ParameterSpec::string("errorMessage").required()],
            inputs: IN_MAIN,
            outputs: NO_PORTS,
        },
    ]
}
