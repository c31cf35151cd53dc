//! Invocation by function name.
//!
//! The ledger runtime delivers a call as a function name plus string
//! arguments. [`Command::parse`] turns that into a typed [`Command`],
//! [`PersonRegistry::execute`] runs it, and [`Output::to_payload`] renders the
//! JSON the caller receives.
//!
//! | Function | Aliases | Arguments |
//! |----------|---------|-----------|
//! | `CreatePerson` | `Create` | name, age, idType, idNo, address |
//! | `UpdateDetails` | `Update` | idNo, age, address, isEmployed, isMarried |
//! | `GetById` | | idNo |
//! | `GetEmployed` | | isEmployed |
//! | `GetPeople` | | |
//! | `DeletePerson` | `Delete`, `DeleteAll` | idNo |

use personledger_core::{Error, Person, QueryResult, Result};
use personledger_state::WorldState;

use crate::registry::{PersonRegistry, CREATE, DELETE, GET_BY_ID, GET_EMPLOYED, GET_PEOPLE, UPDATE};

/// A parsed contract call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Store a new record, replacing any record under `id_no`
    CreatePerson {
        /// Full name
        name: String,
        /// Age in years
        age: i64,
        /// Kind of identity document
        id_type: String,
        /// Identity number
        id_no: i64,
        /// Postal address
        address: String,
    },
    /// Replace the mutable attributes of an existing record
    UpdateDetails {
        /// Identity number
        id_no: i64,
        /// New age
        age: i64,
        /// New address
        address: String,
        /// New employment flag
        is_employed: bool,
        /// New marital flag
        is_married: bool,
    },
    /// Read one record
    GetById {
        /// Identity number
        id_no: i64,
    },
    /// List unmarried records with the given employment flag
    GetEmployed {
        /// Employment flag to match
        is_employed: bool,
    },
    /// List every record with its key
    GetPeople,
    /// Remove one record
    DeletePerson {
        /// Identity number
        id_no: i64,
    },
}

impl Command {
    /// Canonical function name.
    pub fn name(&self) -> &'static str {
        match self {
            Command::CreatePerson { .. } => CREATE,
            Command::UpdateDetails { .. } => UPDATE,
            Command::GetById { .. } => GET_BY_ID,
            Command::GetEmployed { .. } => GET_EMPLOYED,
            Command::GetPeople => GET_PEOPLE,
            Command::DeletePerson { .. } => DELETE,
        }
    }

    /// Parse a call from its function name and raw arguments.
    pub fn parse<S: AsRef<str>>(function: &str, args: &[S]) -> Result<Command> {
        let args: Vec<&str> = args.iter().map(|a| a.as_ref()).collect();
        match function {
            "CreatePerson" | "Create" => {
                expect_args(CREATE, &args, 5)?;
                Ok(Command::CreatePerson {
                    name: args[0].to_string(),
                    age: parse_int(CREATE, "age", args[1])?,
                    id_type: args[2].to_string(),
                    id_no: parse_int(CREATE, "idNo", args[3])?,
                    address: args[4].to_string(),
                })
            }
            "UpdateDetails" | "Update" => {
                expect_args(UPDATE, &args, 5)?;
                Ok(Command::UpdateDetails {
                    id_no: parse_int(UPDATE, "idNo", args[0])?,
                    age: parse_int(UPDATE, "age", args[1])?,
                    address: args[2].to_string(),
                    is_employed: parse_bool(UPDATE, "isEmployed", args[3])?,
                    is_married: parse_bool(UPDATE, "isMarried", args[4])?,
                })
            }
            "GetById" => {
                expect_args(GET_BY_ID, &args, 1)?;
                Ok(Command::GetById {
                    id_no: parse_int(GET_BY_ID, "idNo", args[0])?,
                })
            }
            "GetEmployed" => {
                expect_args(GET_EMPLOYED, &args, 1)?;
                Ok(Command::GetEmployed {
                    is_employed: parse_bool(GET_EMPLOYED, "isEmployed", args[0])?,
                })
            }
            "GetPeople" => {
                expect_args(GET_PEOPLE, &args, 0)?;
                Ok(Command::GetPeople)
            }
            "DeletePerson" | "Delete" | "DeleteAll" => {
                expect_args(DELETE, &args, 1)?;
                Ok(Command::DeletePerson {
                    id_no: parse_int(DELETE, "idNo", args[0])?,
                })
            }
            other => Err(Error::InvalidInput(format!("unknown function: {}", other))),
        }
    }
}

fn expect_args(function: &str, args: &[&str], expected: usize) -> Result<()> {
    if args.len() != expected {
        return Err(Error::InvalidInput(format!(
            "{}: expected {} arguments, got {}",
            function,
            expected,
            args.len()
        )));
    }
    Ok(())
}

fn parse_int(function: &str, arg: &str, raw: &str) -> Result<i64> {
    raw.trim().parse().map_err(|_| {
        Error::InvalidInput(format!("{}: {} must be an integer, got {:?}", function, arg, raw))
    })
}

// Same spellings as Go's strconv.ParseBool, which ledger clients commonly emit.
fn parse_bool(function: &str, arg: &str, raw: &str) -> Result<bool> {
    match raw.trim() {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Ok(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Ok(false),
        _ => Err(Error::InvalidInput(format!(
            "{}: {} must be a boolean, got {:?}",
            function, arg, raw
        ))),
    }
}

/// Result of an executed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    /// Write succeeded; nothing to return
    Unit,
    /// A single record
    Person(Person),
    /// Records without keys
    People(Vec<Person>),
    /// Records with their keys
    Records(Vec<QueryResult>),
}

impl Output {
    /// JSON bytes returned to the caller. `Unit` renders as an empty payload.
    pub fn to_payload(&self) -> Result<Vec<u8>> {
        let bytes = match self {
            Output::Unit => Vec::new(),
            Output::Person(person) => serde_json::to_vec(person)?,
            Output::People(people) => serde_json::to_vec(people)?,
            Output::Records(records) => serde_json::to_vec(records)?,
        };
        Ok(bytes)
    }
}

impl PersonRegistry {
    /// Run a parsed command against `state`.
    pub fn execute(&self, state: &dyn WorldState, command: Command) -> Result<Output> {
        match command {
            Command::CreatePerson {
                name,
                age,
                id_type,
                id_no,
                address,
            } => {
                self.create(state, &name, age, &id_type, id_no, &address)?;
                Ok(Output::Unit)
            }
            Command::UpdateDetails {
                id_no,
                age,
                address,
                is_employed,
                is_married,
            } => {
                self.update(state, id_no, age, &address, is_employed, is_married)?;
                Ok(Output::Unit)
            }
            Command::GetById { id_no } => self.get_by_id(state, id_no).map(Output::Person),
            Command::GetEmployed { is_employed } => {
                self.get_employed(state, is_employed).map(Output::People)
            }
            Command::GetPeople => self.get_people(state).map(Output::Records),
            Command::DeletePerson { id_no } => {
                self.delete(state, id_no)?;
                Ok(Output::Unit)
            }
        }
    }

    /// Parse and run a call in one step, returning the JSON payload.
    pub fn invoke<S: AsRef<str>>(
        &self,
        state: &dyn WorldState,
        function: &str,
        args: &[S],
    ) -> Result<Vec<u8>> {
        let command = Command::parse(function, args)?;
        self.execute(state, command)?.to_payload()
    }
}
