// handlers/mod.rs - one module per resource
//
// Routes:
//   /                         public::root
//   /health                   public::health
//   /api/users                users::list, users::create
//   /api/users/:id/tickets    users::tickets
//   /api/tickets              tickets::list, tickets::create
//   /api/tickets/:id          tickets::update_status, tickets::delete

pub mod public;
pub mod tickets;
pub mod users;
pub mod utils;
