mod memory_user_cache_tests;
