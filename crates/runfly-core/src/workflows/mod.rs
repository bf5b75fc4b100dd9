// ── Asynchronous workflow orchestrators ──
//
// Every orchestrator follows the same discipline: dispatch the request
// phase, await the service, dispatch exactly one terminal phase plus
// any secondary merge. Failures become state, never panics or returned
// errors.

pub mod collaboration;
pub mod deploy;
pub mod projects;
