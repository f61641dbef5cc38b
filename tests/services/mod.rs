mod test_migration_service;
