use anyhow::{Context, Result};
use gcloud_gax::grpc::Code;
use gcloud_googleapis::spanner::admin::database::v1::{
    CreateDatabaseRequest, GetDatabaseDdlRequest, GetDatabaseRequest, UpdateDatabaseDdlRequest,
};
use gcloud_googleapis::spanner::admin::instance::v1::{
    CreateInstanceRequest, GetInstanceRequest, Instance,
};
use gcloud_spanner::admin::AdminClientConfig;
use gcloud_spanner::admin::client::Client as AdminClient;
use gcloud_spanner::client::{Client, ClientConfig};
use gcloud_spanner::key::Key;
use gcloud_spanner::mutation::{delete, insert, update};
use gcloud_spanner::row::Row;
use gcloud_spanner::statement::{Statement, ToKind};
use std::sync::Arc;
use uuid::Uuid;

use crate::config::Config;
use crate::models::{Employee, NewEmployee, UpdateEmployee};

const TABLE: &str = "employees";
const COLUMNS: [&str; 4] = ["id", "name", "department", "salary"];

/// Shareable employee store backed by Spanner, for use across async handlers
#[derive(Clone)]
pub struct EmployeeStore {
    inner: Arc<Client>,
}

impl EmployeeStore {
    /// Create a new store from configuration
    ///
    /// Connects to Spanner using the provided config. The gcloud-spanner
    /// library automatically detects the SPANNER_EMULATOR_HOST environment
    /// variable and connects to the emulator when set, or production
    /// Spanner otherwise.
    ///
    /// This function also performs auto-provisioning: it will automatically
    /// create the instance, database, and table if they don't exist.
    pub async fn from_config(config: &Config) -> Result<Self> {
        auto_provision(config).await?;

        let database_path = config.database_path();

        if let Some(host) = &config.spanner_emulator_host {
            tracing::info!("Connecting to Spanner emulator at: {}", host);
        } else {
            tracing::info!("Connecting to production Spanner");
        }

        // ClientConfig::default() automatically uses SPANNER_EMULATOR_HOST if set
        let client = Client::new(&database_path, ClientConfig::default())
            .await
            .context("Failed to create Spanner client")?;

        tracing::info!(
            "Successfully connected to Spanner database: {}",
            database_path
        );

        Ok(Self {
            inner: Arc::new(client),
        })
    }

    /// Insert a new employee record, assigning a fresh UUID id
    ///
    /// # Errors
    /// Returns an error if the Spanner write fails
    pub async fn insert(&self, new: NewEmployee) -> Result<Employee> {
        let employee = Employee {
            id: Uuid::new_v4().to_string(),
            name: new.name,
            department: new.department,
            salary: new.salary,
        };

        let mutation = insert(
            TABLE,
            &COLUMNS,
            &[
                &employee.id,
                &employee.name,
                &employee.department,
                &employee.salary,
            ],
        );

        self.inner
            .apply(vec![mutation])
            .await
            .context("Failed to insert employee into Spanner")?;

        tracing::debug!("Inserted employee with id: {}", employee.id);
        Ok(employee)
    }

    /// Fetch an employee by id
    ///
    /// # Returns
    /// * `Ok(Some(employee))` - Record found and returned
    /// * `Ok(None)` - No record with this id
    /// * `Err(_)` - Spanner operation failed
    pub async fn find(&self, id: Uuid) -> Result<Option<Employee>> {
        let id_str = id.to_string();

        let mut statement = Statement::new(
            "SELECT id, name, department, salary FROM employees WHERE id = @id",
        );
        statement.add_param("id", &id_str);

        let mut tx = self
            .inner
            .single()
            .await
            .context("Failed to create read transaction")?;

        let mut result_set = tx
            .query(statement)
            .await
            .context("Failed to query employee from Spanner")?;

        if let Some(row) = result_set.next().await? {
            let employee = row_to_employee(&row)?;
            tracing::debug!("Found employee with id: {}", id);
            Ok(Some(employee))
        } else {
            tracing::debug!("No employee with id: {}", id);
            Ok(None)
        }
    }

    /// List all employee records
    ///
    /// No ordering is guaranteed.
    pub async fn list_all(&self) -> Result<Vec<Employee>> {
        let statement = Statement::new("SELECT id, name, department, salary FROM employees");

        let mut tx = self
            .inner
            .single()
            .await
            .context("Failed to create read transaction")?;

        let mut result_set = tx
            .query(statement)
            .await
            .context("Failed to query employees from Spanner")?;

        let mut employees = Vec::new();
        while let Some(row) = result_set.next().await? {
            employees.push(row_to_employee(&row)?);
        }

        tracing::debug!("Listed {} employees", employees.len());
        Ok(employees)
    }

    /// Apply a partial update to an employee record
    ///
    /// The write covers only the submitted fields, so updates touching
    /// disjoint fields cannot overwrite each other; omitted fields keep
    /// whatever value the store holds. Returns the record as it stands
    /// after the update, or `None` when no record with this id exists.
    ///
    /// # Errors
    /// Returns an error if the Spanner read or write fails
    pub async fn update(&self, id: Uuid, changes: UpdateEmployee) -> Result<Option<Employee>> {
        let Some(current) = self.find(id).await? else {
            return Ok(None);
        };

        // Nothing whitelisted was submitted; skip the write
        if changes.is_empty() {
            return Ok(Some(current));
        }

        // `values` holds `&dyn ToKind` which is not `Send`; scope it so it
        // is dropped before the await below
        let mutation = {
            let (columns, values) = update_columns(&current.id, &changes);
            update(TABLE, &columns, &values)
        };

        self.inner
            .apply(vec![mutation])
            .await
            .context("Failed to update employee in Spanner")?;

        tracing::debug!("Updated employee with id: {}", id);
        Ok(Some(Employee {
            id: current.id,
            name: changes.name.unwrap_or(current.name),
            department: changes.department.unwrap_or(current.department),
            salary: changes.salary.unwrap_or(current.salary),
        }))
    }

    /// Delete an employee record by id
    ///
    /// Returns the deleted record, or `None` when no record with this id
    /// exists.
    ///
    /// # Errors
    /// Returns an error if the Spanner read or write fails
    pub async fn delete(&self, id: Uuid) -> Result<Option<Employee>> {
        let Some(employee) = self.find(id).await? else {
            return Ok(None);
        };

        let id_str = id.to_string();
        let mutation = delete(TABLE, Key::new(&id_str));

        self.inner
            .apply(vec![mutation])
            .await
            .context("Failed to delete employee from Spanner")?;

        tracing::debug!("Deleted employee with id: {}", id);
        Ok(Some(employee))
    }

    /// Perform a health check by executing a simple query
    ///
    /// # Returns
    /// * `Ok(())` - Database is reachable and responsive
    /// * `Err(_)` - Database connection failed or query failed
    pub async fn health_check(&self) -> Result<()> {
        let statement = Statement::new("SELECT 1");

        let mut tx = self
            .inner
            .single()
            .await
            .context("Failed to create health check transaction")?;

        let mut result_set = tx
            .query(statement)
            .await
            .context("Failed to execute health check query")?;

        if result_set.next().await?.is_some() {
            tracing::debug!("Health check query succeeded");
            Ok(())
        } else {
            Err(anyhow::anyhow!("Health check query returned no results"))
        }
    }
}

/// Column/value pairs for an update mutation, covering the key and the
/// submitted fields only
fn update_columns<'a>(
    id: &'a String,
    changes: &'a UpdateEmployee,
) -> (Vec<&'a str>, Vec<&'a dyn ToKind>) {
    let mut columns: Vec<&str> = vec!["id"];
    let mut values: Vec<&dyn ToKind> = vec![id];

    if let Some(name) = &changes.name {
        columns.push("name");
        values.push(name);
    }
    if let Some(department) = &changes.department {
        columns.push("department");
        values.push(department);
    }
    if let Some(salary) = &changes.salary {
        columns.push("salary");
        values.push(salary);
    }

    (columns, values)
}

fn row_to_employee(row: &Row) -> Result<Employee> {
    let id: String = row.column_by_name("id")?;
    let name: String = row.column_by_name("name")?;
    let department: String = row.column_by_name("department")?;
    let salary: f64 = row.column_by_name("salary")?;

    Ok(Employee {
        id,
        name,
        department,
        salary,
    })
}

/// Automatically provision the Spanner instance, database, and table
///
/// Checks whether the configured resources exist and creates them if
/// needed. Enables zero-setup local development with the emulator.
async fn auto_provision(config: &Config) -> Result<()> {
    tracing::info!("Starting auto-provisioning checks...");

    let admin_client = AdminClient::new(AdminClientConfig::default())
        .await
        .context("Failed to create Spanner admin client")?;

    let project_path = format!("projects/{}", config.spanner_project);
    let instance_path = format!("{}/instances/{}", project_path, config.spanner_instance);
    let database_path = format!("{}/databases/{}", instance_path, config.spanner_database);

    ensure_instance_exists(&admin_client, config, &project_path, &instance_path).await?;
    ensure_database_exists(&admin_client, &instance_path, &database_path).await?;
    ensure_table_exists(&admin_client, &database_path).await?;

    tracing::info!("Auto-provisioning complete");
    Ok(())
}

/// Ensure the Spanner instance exists, creating it if necessary
async fn ensure_instance_exists(
    admin_client: &AdminClient,
    config: &Config,
    project_path: &str,
    instance_path: &str,
) -> Result<()> {
    let get_request = GetInstanceRequest {
        name: instance_path.to_string(),
        field_mask: None,
    };

    match admin_client.instance().get_instance(get_request, None).await {
        Ok(_) => {
            tracing::info!("Instance already exists: {}", instance_path);
            Ok(())
        }
        Err(status) if status.code() == Code::NotFound => {
            tracing::info!("Instance not found, creating: {}", instance_path);

            let instance_config = if config.spanner_emulator_host.is_some() {
                format!("{}/instanceConfigs/emulator-config", project_path)
            } else {
                format!("{}/instanceConfigs/regional-us-central1", project_path)
            };

            let create_request = CreateInstanceRequest {
                parent: project_path.to_string(),
                instance_id: config.spanner_instance.clone(),
                instance: Some(Instance {
                    name: instance_path.to_string(),
                    config: instance_config,
                    display_name: format!("{} instance", config.spanner_instance),
                    node_count: 1,
                    ..Default::default()
                }),
            };

            let mut operation = admin_client
                .instance()
                .create_instance(create_request, None)
                .await
                .context("Failed to start instance creation")?;

            operation
                .wait(None)
                .await
                .context("Failed to create instance")?;

            tracing::info!("Instance created successfully: {}", instance_path);
            Ok(())
        }
        Err(e) => Err(anyhow::anyhow!(
            "Failed to check instance existence: {}",
            e.message()
        )),
    }
}

/// Ensure the Spanner database exists, creating it if necessary
async fn ensure_database_exists(
    admin_client: &AdminClient,
    instance_path: &str,
    database_path: &str,
) -> Result<()> {
    let get_request = GetDatabaseRequest {
        name: database_path.to_string(),
    };

    match admin_client
        .database()
        .get_database(get_request, None)
        .await
    {
        Ok(_) => {
            tracing::info!("Database already exists: {}", database_path);
            Ok(())
        }
        Err(status) if status.code() == Code::NotFound => {
            tracing::info!("Database not found, creating: {}", database_path);

            let database_id = database_path
                .split('/')
                .next_back()
                .context("Invalid database path")?;

            let create_request = CreateDatabaseRequest {
                parent: instance_path.to_string(),
                create_statement: format!("CREATE DATABASE `{}`", database_id),
                extra_statements: vec![],
                encryption_config: None,
                database_dialect: 1, // Google Standard SQL
                proto_descriptors: vec![],
            };

            let mut operation = admin_client
                .database()
                .create_database(create_request, None)
                .await
                .context("Failed to start database creation")?;

            operation
                .wait(None)
                .await
                .context("Failed to create database")?;

            tracing::info!("Database created successfully: {}", database_path);
            Ok(())
        }
        Err(e) => Err(anyhow::anyhow!(
            "Failed to check database existence: {}",
            e.message()
        )),
    }
}

/// Ensure the employees table exists, creating it if necessary
async fn ensure_table_exists(admin_client: &AdminClient, database_path: &str) -> Result<()> {
    let get_ddl_request = GetDatabaseDdlRequest {
        database: database_path.to_string(),
    };

    let ddl_response = admin_client
        .database()
        .get_database_ddl(get_ddl_request, None)
        .await
        .context("Failed to get database DDL")?;

    let table_exists = ddl_response
        .into_inner()
        .statements
        .iter()
        .any(|stmt| {
            stmt.contains("CREATE TABLE employees") || stmt.contains("CREATE TABLE `employees`")
        });

    if table_exists {
        tracing::info!("Table 'employees' already exists");
        Ok(())
    } else {
        tracing::info!("Table 'employees' not found, creating...");

        let create_table_ddl = r#"
CREATE TABLE employees (
    id STRING(36) NOT NULL,
    name STRING(MAX) NOT NULL,
    department STRING(MAX) NOT NULL,
    salary FLOAT64 NOT NULL,
) PRIMARY KEY (id)
"#
        .trim()
        .to_string();

        let update_request = UpdateDatabaseDdlRequest {
            database: database_path.to_string(),
            statements: vec![create_table_ddl],
            operation_id: String::new(),
            proto_descriptors: vec![],
            throughput_mode: false,
        };

        let mut operation = admin_client
            .database()
            .update_database_ddl(update_request, None)
            .await
            .context("Failed to start table creation")?;

        operation
            .wait(None)
            .await
            .context("Failed to create table")?;

        tracing::info!("Table 'employees' created successfully");
        Ok(())
    }
}
